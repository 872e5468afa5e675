// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The member bar chart.
//!
//! Each member is a bar at its score, as tall as its volume. Parties can be shown and hidden as
//! groups, and a party can be pinned visible (or hidden) so that transient show/hide requests,
//! such as hover previews, leave it alone. Zooming narrows the score axis to the current
//! selection.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use agenda_core::{Attr, Mark, Scene, Surface, SvgSurface};
use hashbrown::HashMap;
use smallvec::smallvec;

use crate::chart::{Renderable, Zoom};
use crate::engine::{self, BAR_STAGGER, BAR_ZOOM_DELAY, row_id};
use crate::event::{EventHandlers, PointerEvent, Tooltip, TooltipState};
use crate::frame::ChartFrame;
use crate::options::{ChartOptions, RangeOverrides};
use crate::record::{Member, MemberRecord, PartyId, normalize_members};
use crate::scale::{Domain, ScaleColor, ScaleLinear, extent};
use crate::selection::{PartyRef, Selection, SelectionCache};
use crate::z_order;

/// Party pinned visible by a complete render.
const DEFAULT_PARTY: PartyId = PartyId(0);

/// A bar per member, ordered by score.
pub struct MembersChart<S = SvgSurface, T = TooltipState> {
    frame: ChartFrame<S, T>,
    data: Vec<Member>,
    displayed: Selection,
    selections: SelectionCache,
    pinned: HashMap<PartyId, bool>,
    zoomed: bool,
    bar_width: f64,
    handlers: EventHandlers<Member>,
}

impl<S, T> core::fmt::Debug for MembersChart<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MembersChart")
            .field("frame", &self.frame)
            .field("members", &self.data.len())
            .field("displayed", &self.displayed.len())
            .field("pinned", &self.pinned)
            .field("zoomed", &self.zoomed)
            .field("bar_width", &self.bar_width)
            .finish_non_exhaustive()
    }
}

impl MembersChart {
    /// Creates a chart drawing into its own [`SvgSurface`] of the configured size.
    pub fn new(options: ChartOptions, records: &[MemberRecord]) -> Self {
        let surface = SvgSurface::new(options.width, options.height);
        Self::with_surface(options, records, surface)
    }
}

impl<S: Surface> MembersChart<S, TooltipState> {
    /// Creates a chart drawing into a caller-supplied surface.
    pub fn with_surface(options: ChartOptions, records: &[MemberRecord], surface: S) -> Self {
        Self::with_parts(
            options,
            records,
            surface,
            TooltipState::new("members_tooltip", 200.0),
        )
    }
}

impl<S: Surface, T: Tooltip> MembersChart<S, T> {
    /// Creates a chart with a caller-supplied surface and tooltip.
    pub fn with_parts(
        options: ChartOptions,
        records: &[MemberRecord],
        surface: S,
        tooltip: T,
    ) -> Self {
        let data = normalize_members(records);
        Self {
            frame: ChartFrame::new(options, surface, tooltip),
            displayed: Selection::all(data.len()),
            selections: SelectionCache::new(data.len()),
            data,
            pinned: HashMap::new(),
            zoomed: false,
            bar_width: 1.0,
            handlers: EventHandlers::default(),
        }
    }

    /// Sets the pointer callbacks.
    pub fn with_handlers(mut self, handlers: EventHandlers<Member>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Normalized members, in paint order.
    pub fn data(&self) -> &[Member] {
        &self.data
    }

    /// The rows the score axis is fitted to: everything, or the zoomed-in selection.
    pub fn displayed(&self) -> &Selection {
        &self.displayed
    }

    /// The selection zooming in will fit, if one was made.
    pub fn current_selection(&self) -> Option<&Selection> {
        self.selections.current()
    }

    /// Whether `party` is pinned visible.
    pub fn is_pinned(&self, party: PartyId) -> bool {
        self.pinned.get(&party).copied().unwrap_or(false)
    }

    /// Chart options.
    pub fn options(&self) -> &ChartOptions {
        &self.frame.options
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.frame.surface
    }

    /// The drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.frame.surface
    }

    /// The tooltip.
    pub fn tooltip(&self) -> &T {
        &self.frame.tooltip
    }

    /// Score domain of the x and color scales.
    ///
    /// Zooming refits only `min` and `max`. The median keeps its configured value, which may
    /// lie outside the zoomed extent; it feeds the color scale, and zooming leaves bar colors
    /// unchanged.
    pub fn x_domain(&self) -> Domain {
        self.frame.x_domain
    }

    /// Score to horizontal pixel.
    pub fn x_scale(&self) -> ScaleLinear {
        self.frame.x
    }

    /// Volume to the top edge of a bar.
    pub fn y_scale(&self) -> ScaleLinear {
        self.frame.y
    }

    /// Score to fill color.
    pub fn color_scale(&self) -> ScaleColor {
        self.frame.color
    }

    /// Width of every bar.
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Whether the chart is zoomed in.
    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Replaces the dataset. Bars and scales follow on the next render.
    ///
    /// Cached selections and the current selection are dropped straight away, since their rows
    /// index the old dataset.
    pub fn set_data(&mut self, records: &[MemberRecord]) {
        self.data = normalize_members(records);
        self.selections = SelectionCache::new(self.data.len());
        self.displayed = Selection::all(self.data.len());
    }

    /// Overrides output ranges. Takes effect on the next render or zoom.
    pub fn set_ranges(&mut self, ranges: RangeOverrides) {
        self.frame.options.ranges = ranges;
    }

    fn set_scales(&mut self) {
        let y_max = extent(self.data.iter().map(|m| m.volume)).map_or(0.0, |(_, max)| max);

        self.frame.set_x_domain(None, None, None);
        self.frame.set_x_scale();

        let o = &self.frame.options;
        let y_range = (
            o.ranges.y_min.unwrap_or(o.baseline()),
            o.ranges.y_max.unwrap_or(o.padding.y),
        );
        self.frame.y = ScaleLinear::new((0.0, y_max), y_range);
        self.frame.set_color_scale();
    }

    /// Recomputes every scale, redraws the axis and binds one flat bar per member.
    ///
    /// Rendering shows the whole dataset unzoomed and forgets cached selections. With
    /// `complete`, party 0 is pinned, everything becomes the current selection, and the bars
    /// grow to their volume one after another.
    pub fn render(&mut self, complete: bool) {
        let count = self.data.len();
        self.selections = SelectionCache::new(count);
        self.displayed = Selection::all(count);
        self.zoomed = false;
        self.set_scales();
        let o = &self.frame.options;
        self.bar_width = engine::bar_width(o.width, count, o.bar_padding, o.stroke);
        let (baseline, width, stroke) = (o.baseline(), self.bar_width, o.stroke);
        self.frame.draw_axis();
        self.frame.begin_render();

        let (x, color) = (self.frame.x, self.frame.color);
        engine::bind(
            &mut self.frame.scene,
            self.data.iter().enumerate().map(|(row, m)| {
                Mark::builder(row_id(row))
                    .rect()
                    .z_index(z_order::SERIES)
                    .attr(Attr::X, x.map(m.score))
                    .attr(Attr::Y, baseline)
                    .attr(Attr::Width, width)
                    .attr(Attr::Height, 0.0)
                    .attr(Attr::FillOpacity, engine::FILL_OPACITY)
                    .fill(color.map(m.score))
                    .stroke(engine::OUTLINE, stroke)
                    .build()
            }),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            members = count,
            complete,
            bar_width = self.bar_width,
            x_domain = ?self.frame.x_domain,
            "members chart rendered"
        );

        if complete {
            self.pinned.insert(DEFAULT_PARTY, true);
            let all = self.select(None, false);
            self.transition(&all, false);
        } else {
            self.frame.flush();
        }
    }

    /// Renders and grows every bar, unless the chart is already rendered.
    pub fn draw(&mut self) {
        if !self.frame.rendered {
            self.render(false);
            let all = self.selections.all().clone();
            self.transition(&all, false);
        }
    }

    /// Returns the selection of `party`, or of every member for `None`.
    ///
    /// Unless `dont_set_current` is set, the result also becomes the current selection.
    pub fn select(&mut self, party: Option<PartyId>, dont_set_current: bool) -> Selection {
        let selection = match party {
            Some(id) => self.selections.party(id, &self.data).clone(),
            None => self.selections.all().clone(),
        };
        if !dont_set_current {
            self.selections.set_current(selection.clone());
        }
        selection
    }

    /// Flips whether `party` is pinned. With `show_hide`, also shows or hides it right away.
    pub fn toggle<'a>(&mut self, party: impl Into<PartyRef<'a>>, show_hide: bool) {
        let Some(id) = party.into().resolve(&self.data) else {
            return;
        };
        let pinned = !self.is_pinned(id);
        self.pinned.insert(id, pinned);

        #[cfg(feature = "tracing")]
        tracing::debug!(party = id.0, pinned, show_hide, "members chart toggle");

        if show_hide {
            if pinned {
                self.show(id, true);
            } else {
                self.hide(id, true);
            }
        }
    }

    /// Grows the bars of `party` and makes them the current selection.
    ///
    /// Does nothing for a pinned party unless `override_pin` is set, in which case the party
    /// also becomes pinned.
    pub fn show<'a>(&mut self, party: impl Into<PartyRef<'a>>, override_pin: bool) {
        let Some(id) = party.into().resolve(&self.data) else {
            return;
        };
        if !override_pin && self.is_pinned(id) {
            return;
        }
        if override_pin {
            self.pinned.insert(id, true);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(party = id.0, override_pin, "members chart show");

        let selection = self.select(Some(id), false);
        self.transition(&selection, false);
    }

    /// Flattens the bars of `party`. The current selection is left alone.
    ///
    /// Does nothing for a pinned party unless `override_pin` is set, in which case the party
    /// also becomes unpinned.
    pub fn hide<'a>(&mut self, party: impl Into<PartyRef<'a>>, override_pin: bool) {
        let Some(id) = party.into().resolve(&self.data) else {
            return;
        };
        if !override_pin && self.is_pinned(id) {
            return;
        }
        if override_pin {
            self.pinned.insert(id, false);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(party = id.0, override_pin, "members chart hide");

        let selection = self.select(Some(id), true);
        self.transition(&selection, true);
    }

    /// Grows the bars of `selection` to their volume, or flattens them onto the baseline.
    ///
    /// Bars start ten milliseconds apart in selection order, in both directions. Rows past
    /// the end of the dataset are skipped.
    pub fn transition(&mut self, selection: &Selection, out: bool) {
        let (y, baseline, data) = (self.frame.y, self.frame.options.baseline(), &self.data);
        engine::transition_rows(
            &mut self.frame.scene,
            selection.rows(),
            &engine::grow(BAR_STAGGER),
            |row| match data.get(row) {
                None => smallvec![],
                Some(_) if out => smallvec![(Attr::Height, 0.0), (Attr::Y, baseline)],
                Some(member) => {
                    let top = y.map(member.volume);
                    smallvec![(Attr::Height, baseline - top), (Attr::Y, top)]
                }
            },
        );
        self.frame.flush();
    }

    /// Fits the score axis to the current selection ([`Zoom::In`]), to every member
    /// ([`Zoom::InAll`]), or back to the full axis ([`Zoom::Out`]).
    ///
    /// [`Zoom::Toggle`] zooms in on the current selection or out again. Every bar slides to
    /// the new scale after a delay, so a show or hide started just before has time to land.
    pub fn zoom(&mut self, zoom: Zoom) {
        self.zoomed = zoom.apply(self.zoomed);
        self.displayed = match (self.zoomed, zoom) {
            (true, Zoom::In | Zoom::Toggle) => self
                .selections
                .current()
                .unwrap_or_else(|| self.selections.all())
                .clone(),
            _ => self.selections.all().clone(),
        };

        if self.zoomed {
            let scores = self
                .displayed
                .rows()
                .iter()
                .filter_map(|&row| self.data.get(row).map(|m| m.score));
            match extent(scores) {
                Some((min, max)) => self.frame.set_x_domain(Some(min), Some(max), None),
                None => self.frame.set_x_domain(None, None, None),
            }
        } else {
            self.frame
                .set_x_domain(Some(Domain::SCORE.min), Some(Domain::SCORE.max), None);
        }
        self.frame.set_x_scale();
        self.frame.draw_axis();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            zoomed = self.zoomed,
            displayed = self.displayed.len(),
            x_domain = ?self.frame.x_domain,
            "members chart zoom"
        );

        let rows: Vec<usize> = (0..self.data.len()).collect();
        let (x, data) = (self.frame.x, &self.data);
        engine::transition_rows(
            &mut self.frame.scene,
            &rows,
            &engine::zoom(BAR_ZOOM_DELAY),
            |row| smallvec![(Attr::X, x.map(data[row].score))],
        );
        self.frame.flush();
    }

    /// Advances the chart clock and mirrors the result onto the surface.
    pub fn advance(&mut self, now: Duration) {
        self.frame.advance(now);
    }

    /// Dispatches a pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        self.frame.dispatch(event, &self.data, &mut self.handlers);
    }
}

impl<S: Surface, T: Tooltip> Renderable for MembersChart<S, T> {
    type Record = MemberRecord;

    fn set_data(&mut self, records: &[MemberRecord]) {
        Self::set_data(self, records);
    }

    fn set_ranges(&mut self, ranges: RangeOverrides) {
        Self::set_ranges(self, ranges);
    }

    fn render(&mut self, complete: bool) {
        Self::render(self, complete);
    }

    fn draw(&mut self) {
        Self::draw(self);
    }

    fn zoom(&mut self, zoom: Zoom) {
        Self::zoom(self, zoom);
    }

    fn advance(&mut self, now: Duration) {
        Self::advance(self, now);
    }

    fn handle_event(&mut self, event: PointerEvent) {
        Self::handle_event(self, event);
    }

    fn scene(&self) -> &Scene {
        &self.frame.scene
    }
}
