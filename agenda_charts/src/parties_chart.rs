// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The party bubble chart.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use agenda_core::{Attr, Mark, Scene, Surface, SvgSurface, TransitionSpec};
use smallvec::smallvec;

use crate::chart::{Renderable, Zoom};
use crate::engine::{self, BUBBLE_STAGGER, BUBBLE_ZOOM_DELAY, GROW, row_id};
use crate::event::{EventHandlers, PointerEvent, Tooltip, TooltipState};
use crate::frame::ChartFrame;
use crate::options::{ChartOptions, RangeOverrides};
use crate::record::{Party, PartyRecord, normalize_parties};
use crate::scale::{Domain, ScaleColor, ScaleLinear, extent};
use crate::z_order;

/// A bubble per party: x is the score, y the volume, radius the size, color the score.
///
/// Bubbles are painted largest first so small parties stay visible on top of large ones.
pub struct PartiesChart<S = SvgSurface, T = TooltipState> {
    frame: ChartFrame<S, T>,
    data: Vec<Party>,
    r_domain: (f64, f64),
    r: ScaleLinear,
    zoomed: bool,
    handlers: EventHandlers<Party>,
}

impl<S, T> core::fmt::Debug for PartiesChart<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PartiesChart")
            .field("frame", &self.frame)
            .field("parties", &self.data.len())
            .field("r_domain", &self.r_domain)
            .field("zoomed", &self.zoomed)
            .finish_non_exhaustive()
    }
}

impl PartiesChart {
    /// Creates a chart drawing into its own [`SvgSurface`] of the configured size.
    pub fn new(options: ChartOptions, records: &[PartyRecord]) -> Self {
        let surface = SvgSurface::new(options.width, options.height);
        Self::with_surface(options, records, surface)
    }
}

impl<S: Surface> PartiesChart<S, TooltipState> {
    /// Creates a chart drawing into a caller-supplied surface.
    pub fn with_surface(options: ChartOptions, records: &[PartyRecord], surface: S) -> Self {
        Self::with_parts(
            options,
            records,
            surface,
            TooltipState::new("parties_tooltip", 200.0),
        )
    }
}

impl<S: Surface, T: Tooltip> PartiesChart<S, T> {
    /// Creates a chart with a caller-supplied surface and tooltip.
    pub fn with_parts(
        options: ChartOptions,
        records: &[PartyRecord],
        surface: S,
        tooltip: T,
    ) -> Self {
        Self {
            frame: ChartFrame::new(options, surface, tooltip),
            data: normalize_parties(records),
            r_domain: (0.0, 0.0),
            r: ScaleLinear::default(),
            zoomed: false,
            handlers: EventHandlers::default(),
        }
    }

    /// Sets the pointer callbacks.
    pub fn with_handlers(mut self, handlers: EventHandlers<Party>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Normalized parties, in paint order.
    pub fn data(&self) -> &[Party] {
        &self.data
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
    pub fn x_domain(&self) -> Domain {
        self.frame.x_domain
    }

    /// Size domain of the radius scale.
    pub fn r_domain(&self) -> (f64, f64) {
        self.r_domain
    }

    /// Score to horizontal pixel.
    pub fn x_scale(&self) -> ScaleLinear {
        self.frame.x
    }

    /// Volume to vertical pixel.
    pub fn y_scale(&self) -> ScaleLinear {
        self.frame.y
    }

    /// Size to radius.
    pub fn r_scale(&self) -> ScaleLinear {
        self.r
    }

    /// Score to fill color.
    pub fn color_scale(&self) -> ScaleColor {
        self.frame.color
    }

    /// Whether the chart is zoomed in.
    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    /// Replaces the dataset. Takes effect on the next render.
    pub fn set_data(&mut self, records: &[PartyRecord]) {
        self.data = normalize_parties(records);
    }

    /// Overrides output ranges. Takes effect on the next render or zoom.
    pub fn set_ranges(&mut self, ranges: RangeOverrides) {
        self.frame.options.ranges = ranges;
    }

    fn set_scales(&mut self) {
        self.r_domain = extent(self.data.iter().map(|p| p.size as f64)).unwrap_or((0.0, 0.0));
        let y_max = self.data.iter().map(|p| p.volume).max().unwrap_or(0);

        self.frame.set_x_domain(None, None, None);
        self.frame.set_x_scale();

        let o = &self.frame.options;
        let (r_min, r_max) = self.r_domain;
        // Bubbles sit in the lower half until volume gets its own vertical budget.
        let y_range = (
            o.ranges.y_min.unwrap_or(o.height - o.padding.y - 2.0 * r_max),
            o.ranges.y_max.unwrap_or(o.height / 2.0),
        );
        let r_range = (
            o.ranges.r_min.unwrap_or(2.0 * r_min),
            o.ranges.r_max.unwrap_or(2.0 * r_max),
        );
        self.frame.y = ScaleLinear::new((0.0, y_max as f64), y_range);
        self.r = ScaleLinear::new(self.r_domain, r_range);
        self.frame.set_color_scale();
    }

    /// Recomputes every scale, redraws the axis and binds one circle per party.
    ///
    /// Circles start with radius zero. With `complete`, they grow to their size one after
    /// another.
    pub fn render(&mut self, complete: bool) {
        self.set_scales();
        self.frame.draw_axis();
        self.frame.begin_render();

        let (x, y, color) = (self.frame.x, self.frame.y, self.frame.color);
        engine::bind(
            &mut self.frame.scene,
            self.data.iter().enumerate().map(|(row, p)| {
                let score = p.score as f64;
                Mark::builder(row_id(row))
                    .circle()
                    .z_index(z_order::SERIES)
                    .attr(Attr::Cx, x.map(score))
                    .attr(Attr::Cy, y.map(p.volume as f64))
                    .attr(Attr::R, 0.0)
                    .attr(Attr::FillOpacity, engine::FILL_OPACITY)
                    .fill(color.map(score))
                    .stroke(engine::OUTLINE, 1.0)
                    .build()
            }),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            parties = self.data.len(),
            complete,
            x_domain = ?self.frame.x_domain,
            r_domain = ?self.r_domain,
            "parties chart rendered"
        );

        if complete {
            self.transition(false);
        } else {
            self.frame.flush();
        }
    }

    /// Renders and grows every bubble, unless the chart is already rendered.
    pub fn draw(&mut self) {
        if !self.frame.rendered {
            self.render(false);
            self.transition(false);
        }
    }

    /// Grows every bubble to its size (staggered), or shrinks every bubble to nothing.
    pub fn transition(&mut self, out: bool) {
        let spec = if out {
            TransitionSpec::new(GROW)
        } else {
            engine::grow(BUBBLE_STAGGER)
        };
        let rows: Vec<usize> = (0..self.data.len()).collect();
        let (r, data) = (self.r, &self.data);
        engine::transition_rows(&mut self.frame.scene, &rows, &spec, |row| {
            let radius = if out {
                0.0
            } else {
                r.map(data[row].size as f64)
            };
            smallvec![(Attr::R, radius)]
        });
        self.frame.flush();
    }

    /// Switches between the configured score domain (zoomed in) and the full axis.
    ///
    /// Zooming never narrows the party set; [`Zoom::In`] and [`Zoom::InAll`] behave the same.
    pub fn zoom(&mut self, zoom: Zoom) {
        self.zoomed = zoom.apply(self.zoomed);
        if self.zoomed {
            self.frame.set_x_domain(None, None, None);
        } else {
            self.frame
                .set_x_domain(Some(Domain::SCORE.min), Some(Domain::SCORE.max), None);
        }
        self.frame.set_x_scale();
        self.frame.draw_axis();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            zoomed = self.zoomed,
            x_domain = ?self.frame.x_domain,
            "parties chart zoom"
        );

        let rows: Vec<usize> = (0..self.data.len()).collect();
        let (x, data) = (self.frame.x, &self.data);
        engine::transition_rows(
            &mut self.frame.scene,
            &rows,
            &engine::zoom(BUBBLE_ZOOM_DELAY),
            |row| smallvec![(Attr::Cx, x.map(data[row].score as f64))],
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

impl<S: Surface, T: Tooltip> Renderable for PartiesChart<S, T> {
    type Record = PartyRecord;

    fn set_data(&mut self, records: &[PartyRecord]) {
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

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::RefCell;

    use agenda_core::MarkKind;
    use peniko::color::palette::css;

    use super::*;
    use crate::engine::AXIS_LAYER;
    use crate::options::DomainOverrides;

    fn example() -> Vec<PartyRecord> {
        vec![
            PartyRecord::new(50.0, 10.0, 5.0, "A", 1),
            PartyRecord::new(-20.0, 20.0, 8.0, "B", 2),
        ]
    }

    fn radius(chart: &PartiesChart, row: usize) -> f64 {
        chart
            .surface()
            .get(row_id(row))
            .and_then(|m| m.get(Attr::R))
            .unwrap()
    }

    #[test]
    fn render_derives_domains_and_ranges() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(false);

        assert_eq!(chart.data()[0].name, "B", "largest party first");
        assert_eq!(chart.x_domain(), Domain::SCORE);
        assert_eq!(chart.r_domain(), (5.0, 8.0));
        assert_eq!(chart.r_scale().range(), (10.0, 16.0));
        assert_eq!(chart.y_scale().domain(), (0.0, 20.0));
        assert_eq!(chart.y_scale().range(), (154.0, 100.0));
        assert_eq!(chart.x_scale().range(), (30.0, 470.0));
    }

    #[test]
    fn render_places_neutral_circles() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(false);

        let b = chart.surface().get(row_id(0)).unwrap();
        assert_eq!(b.kind, MarkKind::Circle);
        assert_eq!(b.get(Attr::Cx), Some(206.0));
        assert_eq!(b.get(Attr::Cy), Some(100.0));
        assert_eq!(b.get(Attr::R), Some(0.0));
        assert_eq!(b.get(Attr::FillOpacity), Some(0.7));
        assert_eq!(b.stroke, Some(engine::OUTLINE));
        assert_eq!(b.fill, Some(chart.color_scale().map(-20.0)));
        assert!(chart.is_settled(), "nothing moves without `complete`");
    }

    #[test]
    fn complete_render_grows_bubbles_in_order() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(true);
        assert_eq!(
            chart.scene().settle_time(),
            GROW + BUBBLE_STAGGER,
            "second bubble starts one stagger late"
        );

        chart.advance(Duration::from_millis(50));
        assert!(radius(&chart, 0) > 0.0, "first bubble is growing");
        assert_eq!(radius(&chart, 1), 0.0, "second bubble waits its turn");

        chart.settle();
        assert_eq!(radius(&chart, 0), 16.0);
        assert_eq!(radius(&chart, 1), 10.0);
    }

    #[test]
    fn draw_only_runs_once() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.draw();
        chart.settle();
        assert_eq!(radius(&chart, 0), 16.0);

        chart.draw();
        assert!(chart.is_settled(), "second draw schedules nothing");
    }

    #[test]
    fn transition_out_shrinks_every_bubble_at_once() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(true);
        chart.settle();
        chart.transition(true);
        assert_eq!(chart.scene().settle_time(), chart.scene().now() + GROW);
        chart.settle();
        assert_eq!(radius(&chart, 0), 0.0);
        assert_eq!(radius(&chart, 1), 0.0);
    }

    #[test]
    fn zoom_moves_only_cx_after_its_delay() {
        let options = ChartOptions::default().with_domains(DomainOverrides {
            min: Some(-50.0),
            max: Some(50.0),
            med: None,
        });
        let mut chart = PartiesChart::new(options, &example());
        chart.render(true);
        chart.settle();
        let start = chart.scene().now();
        let cx_a = |c: &PartiesChart| c.surface().get(row_id(1)).and_then(|m| m.get(Attr::Cx));
        assert_eq!(cx_a(&chart), Some(470.0), "score 50 is the right edge of [-50, 50]");

        chart.zoom(Zoom::Out);
        assert!(!chart.is_zoomed());
        assert_eq!(chart.x_domain(), Domain::new(-100.0, 100.0, 0.0));

        chart.advance(start + BUBBLE_ZOOM_DELAY);
        assert_eq!(cx_a(&chart), Some(470.0), "nothing moves during the delay");

        chart.settle();
        assert_eq!(cx_a(&chart), Some(360.0));
        assert_eq!(radius(&chart, 1), 10.0, "radius untouched");

        chart.zoom(Zoom::Toggle);
        assert!(chart.is_zoomed());
        assert_eq!(chart.x_domain(), Domain::new(-50.0, 50.0, 0.0));
        chart.settle();
        assert_eq!(cx_a(&chart), Some(470.0));
    }

    #[test]
    fn axis_follows_options() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(false);
        assert!(!chart.scene().layer_ids(AXIS_LAYER).is_empty());

        let mut bare =
            PartiesChart::new(ChartOptions::default().with_axes(false), &example());
        bare.render(false);
        assert!(bare.scene().layer_ids(AXIS_LAYER).is_empty());
        assert_eq!(bare.surface().len(), 2, "only the bubbles");
    }

    #[test]
    fn hover_outlines_and_shows_the_party_name() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut chart = PartiesChart::new(ChartOptions::default(), &example()).with_handlers(
            EventHandlers::default()
                .on_mouseover(move |p: &Party, i, _| log.borrow_mut().push((p.name.clone(), i))),
        );
        chart.draw();
        chart.settle();

        chart.handle_event(PointerEvent::moved((206.0, 100.0)));
        assert!(chart.tooltip().is_visible());
        assert_eq!(chart.tooltip().content(), "B");
        assert_eq!(chart.tooltip().id(), "parties_tooltip");
        assert_eq!(
            chart.surface().get(row_id(0)).and_then(|m| m.stroke),
            Some(css::BLACK)
        );
        assert_eq!(*seen.borrow(), vec![(String::from("B"), 0)]);

        chart.handle_event(PointerEvent::moved((206.0, 101.0)));
        assert_eq!(seen.borrow().len(), 1, "still over the same bubble");

        chart.handle_event(PointerEvent::moved((5.0, 5.0)));
        assert!(!chart.tooltip().is_visible());
        assert_eq!(
            chart.surface().get(row_id(0)).and_then(|m| m.stroke),
            Some(css::BLACK),
            "the outline is not restored"
        );
    }

    #[test]
    fn zero_radius_bubbles_cannot_be_hovered() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &example());
        chart.render(false);
        chart.handle_event(PointerEvent::moved((206.0, 100.0)));
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn empty_dataset_renders_nothing_but_the_axis() {
        let mut chart = PartiesChart::new(ChartOptions::default(), &[]);
        chart.draw();
        chart.settle();
        assert_eq!(chart.r_domain(), (0.0, 0.0));
        assert!(chart.scene().layer_ids(engine::DATA_LAYER).is_empty());
    }
}
