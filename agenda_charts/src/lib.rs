// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive voting-agenda charts on top of `agenda_core`.
//!
//! Two controllers share one runtime:
//! - [`PartiesChart`] draws a bubble per party: horizontal position from its score, height from
//!   its volume, radius from its size.
//! - [`MembersChart`] draws a bar per member, with parties shown, hidden, pinned and zoomed as
//!   groups.
//!
//! Both take loosely typed records ([`PartyRecord`], [`MemberRecord`]), normalize them, and
//! drive a retained [`agenda_core::Scene`]. Operations schedule timed transitions and return;
//! the host advances the chart clock and the scene mirrors its changes onto a
//! [`agenda_core::Surface`], an [`SvgSurface`] unless told otherwise.
//!
//! Pointer input arrives as [`PointerEvent`]s. Hovering a mark outlines it and shows its name in
//! a [`Tooltip`]; callbacks registered in [`EventHandlers`] see the record and its row.

#![no_std]

extern crate alloc;

mod axis;
mod chart;
mod engine;
mod event;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod frame;
mod members_chart;
mod options;
mod parties_chart;
mod record;
mod scale;
mod selection;
mod z_order;

pub use agenda_core::{Attr, Mark, MarkId, Scene, Surface, SvgSurface};
pub use axis::AxisSpec;
pub use chart::{Renderable, Zoom};
pub use engine::{
    AXIS_LAYER, BAR_STAGGER, BAR_ZOOM_DELAY, BUBBLE_STAGGER, BUBBLE_ZOOM_DELAY, DATA_LAYER,
    FILL_OPACITY, GROW, OUTLINE, ZOOM, bar_width, row_id,
};
pub use event::{EventHandlers, Handler, PointerEvent, PointerKind, Tooltip, TooltipState};
pub use format::format_tick_with_step;
pub use members_chart::MembersChart;
pub use options::{ChartOptions, DomainOverrides, Padding, RangeOverrides};
pub use parties_chart::PartiesChart;
pub use record::{
    Member, MemberRecord, Party, PartyId, PartyRecord, normalize_members, normalize_parties,
};
pub use scale::{Domain, ScaleColor, ScaleLinear, extent};
pub use selection::{PartyRef, Selection};
pub use z_order::*;
