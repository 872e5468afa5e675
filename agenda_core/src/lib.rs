// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained mark scene for agenda charts.
//!
//! This crate is the layer the chart controllers draw into:
//! - **Marks** are retained visual elements with stable ids and named numeric attributes.
//! - **Transitions** schedule timed, eased, optionally staggered attribute interpolation.
//! - **Diffs** describe what changed since the last flush, for a [`Surface`] to mirror.
//!
//! The scene owns its clock but never reads wall time: hosts call [`Scene::advance`] from
//! whatever frame loop they have, which keeps the whole runtime deterministic under test.

#![no_std]

extern crate alloc;

mod diff;
mod id;
mod mark;
mod scene;
mod surface;
mod svg;
mod transition;

pub use diff::MarkDiff;
pub use id::{LayerId, MarkId};
pub use mark::{Attr, Attrs, Mark, MarkBuilder, MarkKind, TextAnchor};
pub use scene::Scene;
pub use surface::Surface;
pub use svg::SvgSurface;
pub use transition::{Easing, TransitionSpec, Tween};
