// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable identities for marks.

/// A group of marks sharing one purpose (data series, axis, ...).
///
/// Layers partition the [`MarkId`] space so charts can address "all data marks" or "all axis
/// marks" without keeping side tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u32);

/// A stable mark identity.
///
/// The upper 32 bits hold the [`LayerId`], the lower 32 bits a row key within that layer.
/// Ordering by `MarkId` therefore orders marks by layer and then by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id for `row_key` within `layer`.
    ///
    /// Row keys are truncated to 32 bits.
    pub const fn for_row(layer: LayerId, row_key: u64) -> Self {
        Self(((layer.0 as u64) << 32) | (row_key & 0xFFFF_FFFF))
    }

    /// Returns the layer this id belongs to.
    pub const fn layer(self) -> LayerId {
        LayerId((self.0 >> 32) as u32)
    }

    /// Returns the row key within the layer.
    pub const fn row(self) -> u64 {
        self.0 & 0xFFFF_FFFF
    }
}
