// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The operations both charts share.

use core::time::Duration;

use agenda_core::Scene;

use crate::event::PointerEvent;
use crate::options::RangeOverrides;

/// A zoom request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Zoom {
    /// Flip between zoomed in and out.
    #[default]
    Toggle,
    /// Zoom in on the current selection.
    In,
    /// Zoom in on the whole dataset.
    InAll,
    /// Zoom out to the full score axis.
    Out,
}

impl Zoom {
    /// The zoom state after applying this request to `zoomed`.
    pub fn apply(self, zoomed: bool) -> bool {
        match self {
            Self::Toggle => !zoomed,
            Self::In | Self::InAll => true,
            Self::Out => false,
        }
    }
}

/// A chart bound to a dataset and a drawing surface.
///
/// Operations schedule work and return; nothing moves until the host calls
/// [`advance`](Renderable::advance).
pub trait Renderable {
    /// The loosely typed input record.
    type Record;

    /// Replaces the dataset. Takes effect on the next render.
    fn set_data(&mut self, records: &[Self::Record]);

    /// Overrides output ranges. Takes effect on the next render or zoom.
    fn set_ranges(&mut self, ranges: RangeOverrides);

    /// Recomputes scales, redraws the axis and rebinds every record to a fresh mark.
    ///
    /// With `complete`, marks also grow into their final geometry.
    fn render(&mut self, complete: bool);

    /// Renders and grows every mark, unless something is already rendered.
    fn draw(&mut self);

    /// Changes the zoom state and moves marks to the new score scale.
    fn zoom(&mut self, zoom: Zoom);

    /// Advances the chart clock to `now` and mirrors the result onto the surface.
    fn advance(&mut self, now: Duration);

    /// Dispatches a pointer event to the mark under the pointer.
    fn handle_event(&mut self, event: PointerEvent);

    /// The retained scene.
    fn scene(&self) -> &Scene;

    /// Returns `true` once every scheduled transition has finished.
    fn is_settled(&self) -> bool {
        self.scene().is_settled()
    }

    /// Advances straight to the end of every scheduled transition.
    fn settle(&mut self) {
        let end = self.scene().settle_time();
        self.advance(end);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn zoom_requests_map_onto_a_binary_state() {
        assert!(Zoom::Toggle.apply(false));
        assert!(!Zoom::Toggle.apply(true));
        assert!(Zoom::In.apply(false));
        assert!(Zoom::InAll.apply(true));
        assert!(!Zoom::Out.apply(true));
    }
}
