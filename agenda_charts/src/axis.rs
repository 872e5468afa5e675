// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! Only the score axis is drawn, along the top edge of the surface with ticks pointing down.
//! An [`AxisSpec`] turns a [`ScaleLinear`] into rule and text marks with stable ids, so
//! re-rendering after a zoom updates the same elements in place.

extern crate alloc;

use alloc::vec::Vec;

use agenda_core::{Attr, LayerId, Mark, MarkId, TextAnchor};
use peniko::Color;
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::scale::ScaleLinear;
use crate::z_order;

const LABEL_ROW_BASE: u64 = 1000;

/// A bottom-oriented axis for a continuous scale.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Layer the generated marks live in.
    pub layer: LayerId,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Label font size.
    pub font_size: f64,
    /// Whether to draw the domain line.
    pub show_domain: bool,
    /// Paint for the domain line and ticks.
    pub stroke: Color,
    /// Paint for the labels.
    pub label_fill: Color,
}

impl AxisSpec {
    /// Creates a bottom axis in `layer` with ten ticks, 6px tick marks and 3px label padding.
    pub fn bottom(layer: LayerId) -> Self {
        Self {
            layer,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
            show_domain: true,
            stroke: css::BLACK,
            label_fill: css::BLACK,
        }
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set tick size.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Enable or disable the domain line.
    pub fn with_domain(mut self, show_domain: bool) -> Self {
        self.show_domain = show_domain;
        self
    }

    /// Id of the domain line.
    pub fn domain_id(&self) -> MarkId {
        MarkId::for_row(self.layer, 0)
    }

    /// Generates the axis marks for `scale`, with the axis line at `y`.
    ///
    /// Ticks and labels are numbered left to right, so a scale with fewer ticks than before
    /// yields a prefix of the previous id set.
    pub fn marks(&self, scale: &ScaleLinear, y: f64) -> Vec<Mark> {
        let (r0, r1) = scale.range();
        let (x0, x1) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        let ticks = scale.ticks(self.tick_count);
        let step = tick_step(&ticks);

        let mut out = Vec::with_capacity(1 + 2 * ticks.len());
        if self.show_domain {
            out.push(
                Mark::builder(self.domain_id())
                    .rule()
                    .z_index(z_order::AXIS_RULES)
                    .attr(Attr::X, x0)
                    .attr(Attr::Y, y)
                    .attr(Attr::X2, x1)
                    .attr(Attr::Y2, y)
                    .stroke(self.stroke, 1.0)
                    .build(),
            );
        }

        // Labels hang below the tick; 0.71em stands in for the cap height.
        let label_y = y + self.tick_size.abs() + self.tick_padding + 0.71 * self.font_size;
        for (i, v) in ticks.iter().copied().enumerate() {
            let x = scale.map(v);
            if !x.is_finite() {
                continue;
            }
            let row = i as u64;
            out.push(
                Mark::builder(MarkId::for_row(self.layer, 1 + row))
                    .rule()
                    .z_index(z_order::AXIS_RULES)
                    .attr(Attr::X, x)
                    .attr(Attr::Y, y)
                    .attr(Attr::X2, x)
                    .attr(Attr::Y2, y + self.tick_size.abs())
                    .stroke(self.stroke, 1.0)
                    .build(),
            );
            out.push(
                Mark::builder(MarkId::for_row(self.layer, LABEL_ROW_BASE + row))
                    .text(format_tick_with_step(v, step))
                    .z_index(z_order::AXIS_LABELS)
                    .attr(Attr::X, x)
                    .attr(Attr::Y, label_y)
                    .attr(Attr::FontSize, self.font_size)
                    .anchor(TextAnchor::Middle)
                    .fill(self.label_fill)
                    .build(),
            );
        }
        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}
