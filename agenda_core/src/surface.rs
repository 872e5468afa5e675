// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering-surface seam.

use crate::MarkDiff;

/// A drawing target that mirrors the scene by applying its diffs.
///
/// Charts own their surface and push diffs after every operation and clock advance. A surface
/// that needs to stay owned elsewhere can be passed as `&mut S`.
pub trait Surface {
    /// Applies a batch of scene changes, in order.
    fn apply_diffs(&mut self, diffs: &[MarkDiff]);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        (**self).apply_diffs(diffs);
    }
}
