// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding rows to marks and scheduling their transitions.
//!
//! Every record of a chart owns exactly one mark in [`DATA_LAYER`], keyed by its dataset row.
//! Timings are fixed: entrance and exit run for [`GROW`], zooms wait for their delay and then
//! move for [`ZOOM`].

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use agenda_core::{Attrs, LayerId, Mark, MarkId, Scene, TransitionSpec};
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Layer holding the score axis.
pub const AXIS_LAYER: LayerId = LayerId(0);
/// Layer holding one mark per record.
pub const DATA_LAYER: LayerId = LayerId(1);

/// Fill opacity of data marks.
pub const FILL_OPACITY: f64 = 0.7;
/// Outline of data marks until they are hovered.
pub const OUTLINE: Color = Color::from_rgba8(0x22, 0x22, 0x22, 0xff);

/// Entrance and exit duration.
pub const GROW: Duration = Duration::from_millis(750);
/// Per-bubble entrance stagger.
pub const BUBBLE_STAGGER: Duration = Duration::from_millis(50);
/// Per-bar entrance and exit stagger.
pub const BAR_STAGGER: Duration = Duration::from_millis(10);
/// Zoom movement duration.
pub const ZOOM: Duration = Duration::from_millis(500);
/// Delay before bubbles move on zoom.
pub const BUBBLE_ZOOM_DELAY: Duration = Duration::from_millis(500);
/// Delay before bars move on zoom; long enough for a running show or hide to mostly finish.
pub const BAR_ZOOM_DELAY: Duration = Duration::from_millis(1000);

/// Id of the mark bound to dataset row `row`.
pub fn row_id(row: usize) -> MarkId {
    MarkId::for_row(DATA_LAYER, row as u64)
}

/// Dataset row of a data mark.
pub(crate) fn id_row(id: MarkId) -> Option<usize> {
    (id.layer() == DATA_LAYER)
        .then(|| usize::try_from(id.row()).ok())
        .flatten()
}

/// Bar width for `count` bars across `width`: the per-bar slot minus padding and stroke,
/// truncated, and never less than one pixel.
pub fn bar_width(width: f64, count: usize, bar_padding: f64, stroke: f64) -> f64 {
    let slot = width / count as f64;
    let w = (slot - bar_padding - stroke).trunc();
    if w.is_finite() && w >= 1.0 { w } else { 1.0 }
}

/// Replaces the data layer with `marks`. Returns their ids in dataset order.
pub(crate) fn bind(scene: &mut Scene, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkId> {
    scene.clear_layer(DATA_LAYER);
    marks
        .into_iter()
        .map(|mark| {
            let id = mark.id;
            scene.insert(mark);
            id
        })
        .collect()
}

/// Schedules a transition over `rows`. Stagger follows position within `rows`.
pub(crate) fn transition_rows(
    scene: &mut Scene,
    rows: &[usize],
    spec: &TransitionSpec,
    mut targets: impl FnMut(usize) -> Attrs,
) {
    let ids: Vec<MarkId> = rows.iter().copied().map(row_id).collect();
    scene.transition(&ids, spec, |i, _| targets(rows[i]));
}

/// Entrance or exit timing with a per-index stagger.
pub(crate) fn grow(stagger: Duration) -> TransitionSpec {
    TransitionSpec::new(GROW).with_stagger(stagger)
}

/// Zoom timing: a fixed delay, then [`ZOOM`].
pub(crate) fn zoom(delay: Duration) -> TransitionSpec {
    TransitionSpec::new(ZOOM).with_delay(delay)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use agenda_core::{Attr, Mark};
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn bar_width_subtracts_padding_and_stroke() {
        assert_eq!(bar_width(500.0, 100, 1.0, 1.0), 3.0);
        assert_eq!(bar_width(500.0, 3, 1.0, 1.0), 164.0, "truncated");
    }

    #[test]
    fn bar_width_never_drops_below_one_pixel() {
        assert_eq!(bar_width(500.0, 1000, 1.0, 1.0), 1.0);
        assert_eq!(bar_width(500.0, 0, 1.0, 1.0), 1.0, "no records yields an infinite slot");
        assert_eq!(bar_width(0.0, 0, 1.0, 1.0), 1.0, "0/0 is NaN");
    }

    #[test]
    fn row_ids_round_trip() {
        assert_eq!(id_row(row_id(42)), Some(42));
        assert_eq!(id_row(MarkId::for_row(AXIS_LAYER, 3)), None);
    }

    #[test]
    fn bind_replaces_the_data_layer() {
        let mut scene = Scene::new();
        bind(
            &mut scene,
            (0..5).map(|row| Mark::builder(row_id(row)).rect().build()),
        );
        let ids = bind(
            &mut scene,
            (0..2).map(|row| Mark::builder(row_id(row)).rect().build()),
        );
        assert_eq!(ids, [row_id(0), row_id(1)]);
        assert_eq!(scene.layer_ids(DATA_LAYER), ids);
    }

    #[test]
    fn transition_rows_staggers_by_position_in_the_subset() {
        let mut scene = Scene::new();
        bind(
            &mut scene,
            (0..4).map(|row| Mark::builder(row_id(row)).circle().attr(Attr::R, 0.0).build()),
        );
        transition_rows(&mut scene, &[1, 3], &grow(BUBBLE_STAGGER), |row| {
            smallvec![(Attr::R, row as f64)]
        });
        // Row 3 is second in the subset, so it starts one stagger late.
        assert_eq!(scene.settle_time(), GROW + BUBBLE_STAGGER);
        scene.advance(scene.settle_time());
        assert_eq!(scene.get(row_id(1)).and_then(|m| m.get(Attr::R)), Some(1.0));
        assert_eq!(scene.get(row_id(3)).and_then(|m| m.get(Attr::R)), Some(3.0));
        assert_eq!(scene.get(row_id(2)).and_then(|m| m.get(Attr::R)), Some(0.0));
    }
}
