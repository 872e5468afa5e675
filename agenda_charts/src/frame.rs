// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State and plumbing shared by both chart controllers.

use core::time::Duration;

use agenda_core::{MarkId, Scene, Surface};
use hashbrown::HashSet;
use peniko::color::palette::css;

use crate::axis::AxisSpec;
use crate::engine::{AXIS_LAYER, DATA_LAYER, id_row};
use crate::event::{EventHandlers, PointerEvent, PointerKind, Tooltip};
use crate::options::ChartOptions;
use crate::record::{Member, Party};
use crate::scale::{Domain, ScaleColor, ScaleLinear};

/// Rows that can describe themselves in a tooltip.
pub(crate) trait Detail {
    fn detail(&self) -> &str;
}

impl Detail for Party {
    fn detail(&self) -> &str {
        &self.name
    }
}

impl Detail for Member {
    fn detail(&self) -> &str {
        &self.name
    }
}

/// Options, scene, surface, tooltip, score scales and hover state of one chart.
pub(crate) struct ChartFrame<S, T> {
    pub(crate) options: ChartOptions,
    pub(crate) scene: Scene,
    pub(crate) surface: S,
    pub(crate) tooltip: T,
    pub(crate) x_domain: Domain,
    pub(crate) x: ScaleLinear,
    pub(crate) y: ScaleLinear,
    pub(crate) color: ScaleColor,
    pub(crate) rendered: bool,
    axis: AxisSpec,
    hovered: Option<MarkId>,
}

impl<S, T> core::fmt::Debug for ChartFrame<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChartFrame")
            .field("options", &self.options)
            .field("x_domain", &self.x_domain)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("marks", &self.scene.len())
            .field("rendered", &self.rendered)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, T: Tooltip> ChartFrame<S, T> {
    pub(crate) fn new(options: ChartOptions, surface: S, tooltip: T) -> Self {
        let x_domain = options.domains.resolve(None, None, None);
        Self {
            options,
            scene: Scene::new(),
            surface,
            tooltip,
            x_domain,
            x: ScaleLinear::default(),
            y: ScaleLinear::default(),
            color: ScaleColor::new(x_domain),
            rendered: false,
            axis: AxisSpec::bottom(AXIS_LAYER),
            hovered: None,
        }
    }

    /// Sets the score domain; unset bounds come from the options, then the defaults.
    pub(crate) fn set_x_domain(&mut self, min: Option<f64>, max: Option<f64>, med: Option<f64>) {
        self.x_domain = self.options.domains.resolve(min, max, med);
    }

    /// Horizontal output range: overrides, else the padded surface width.
    pub(crate) fn x_range(&self) -> (f64, f64) {
        let o = &self.options;
        (
            o.ranges.x_min.unwrap_or(o.padding.x),
            o.ranges.x_max.unwrap_or(o.width - o.padding.x),
        )
    }

    pub(crate) fn set_x_scale(&mut self) {
        self.x = ScaleLinear::new(self.x_domain.extent(), self.x_range());
    }

    pub(crate) fn set_color_scale(&mut self) {
        self.color = ScaleColor::new(self.x_domain);
    }

    /// Redraws the score axis from the current x scale, or removes it when axes are off.
    pub(crate) fn draw_axis(&mut self) {
        if self.options.no_axes {
            self.scene.clear_layer(AXIS_LAYER);
            return;
        }
        let marks = self.axis.marks(&self.x, 0.0);
        let keep: HashSet<MarkId> = marks.iter().map(|m| m.id).collect();
        for id in self.scene.layer_ids(AXIS_LAYER) {
            if !keep.contains(&id) {
                self.scene.remove(id);
            }
        }
        for mark in marks {
            self.scene.insert(mark);
        }
    }

    /// Resets per-render state before the data layer is rebound.
    pub(crate) fn begin_render(&mut self) {
        self.hovered = None;
        self.rendered = true;
    }

    /// Pushes pending scene changes to the surface.
    pub(crate) fn flush(&mut self) {
        let diffs = self.scene.take_diffs();
        if !diffs.is_empty() {
            self.surface.apply_diffs(&diffs);
        }
    }

    pub(crate) fn advance(&mut self, now: Duration) {
        self.scene.advance(now);
        self.flush();
    }

    /// Routes a pointer event to the data mark under the pointer.
    ///
    /// Entering a mark outlines it in black and shows its tooltip; leaving hides the tooltip.
    /// The outline stays.
    pub(crate) fn dispatch<R: Detail>(
        &mut self,
        event: PointerEvent,
        rows: &[R],
        handlers: &mut EventHandlers<R>,
    ) {
        match event.kind {
            PointerKind::Move => {
                let hit = self.hit(&event);
                if hit != self.hovered {
                    if let Some(prev) = self.hovered.take() {
                        self.mouseout(prev, &event, rows, handlers);
                    }
                    if let Some(id) = hit {
                        self.mouseover(id, &event, rows, handlers);
                        self.hovered = Some(id);
                    }
                }
            }
            PointerKind::Leave => {
                if let Some(prev) = self.hovered.take() {
                    self.mouseout(prev, &event, rows, handlers);
                }
            }
            PointerKind::Click | PointerKind::TouchStart => {
                let hit = self.hit(&event).and_then(id_row);
                if let Some((row, record)) = hit.and_then(|row| Some((row, rows.get(row)?))) {
                    handlers.pressed(record, row, &event);
                }
            }
        }
        self.flush();
    }

    fn hit(&self, event: &PointerEvent) -> Option<MarkId> {
        self.scene.hit_test(event.pos, |id| id.layer() == DATA_LAYER)
    }

    fn mouseover<R: Detail>(
        &mut self,
        id: MarkId,
        event: &PointerEvent,
        rows: &[R],
        handlers: &mut EventHandlers<R>,
    ) {
        let Some((row, record)) = id_row(id).and_then(|row| Some((row, rows.get(row)?))) else {
            return;
        };
        self.scene.set_stroke(id, css::BLACK);
        self.tooltip.show_tooltip(record.detail(), event);
        handlers.mouseover(record, row, event);
    }

    fn mouseout<R: Detail>(
        &mut self,
        id: MarkId,
        event: &PointerEvent,
        rows: &[R],
        handlers: &mut EventHandlers<R>,
    ) {
        self.tooltip.hide_tooltip();
        if let Some((row, record)) = id_row(id).and_then(|row| Some((row, rows.get(row)?))) {
            handlers.mouseout(record, row, event);
        }
    }
}
