// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks.
//!
//! Surfaces sort by `(z_index, MarkId)`; within a layer, ids follow dataset order, so records
//! paint in the order the normalizer put them in.

/// Data marks (bubbles, bars).
pub const SERIES: i32 = 0;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
