// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart construction options.

use crate::scale::Domain;

/// Inner padding between the surface edge and the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Padding {
    /// Horizontal padding on each side.
    pub x: f64,
    /// Vertical padding on each side.
    pub y: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self { x: 30.0, y: 30.0 }
    }
}

/// Caller overrides for the score domain. Unset bounds fall back to `[-100, 100]`, median `0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct DomainOverrides {
    /// Lower bound.
    pub min: Option<f64>,
    /// Upper bound.
    pub max: Option<f64>,
    /// Color ramp midpoint.
    pub med: Option<f64>,
}

impl DomainOverrides {
    /// Resolves a score domain: explicit arguments win, then these overrides, then the defaults.
    pub fn resolve(&self, min: Option<f64>, max: Option<f64>, med: Option<f64>) -> Domain {
        let fallback = Domain::SCORE;
        Domain::new(
            min.or(self.min).unwrap_or(fallback.min),
            max.or(self.max).unwrap_or(fallback.max),
            med.or(self.med).unwrap_or(fallback.med),
        )
    }
}

/// Caller overrides for output pixel ranges. Unset ends use the chart's computed defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct RangeOverrides {
    /// Left end of the x range.
    pub x_min: Option<f64>,
    /// Right end of the x range.
    pub x_max: Option<f64>,
    /// Pixel for the lowest y value.
    pub y_min: Option<f64>,
    /// Pixel for the highest y value.
    pub y_max: Option<f64>,
    /// Smallest radius (bubble chart only).
    pub r_min: Option<f64>,
    /// Largest radius (bubble chart only).
    pub r_max: Option<f64>,
}

/// Options shared by both charts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ChartOptions {
    /// Surface height.
    pub height: f64,
    /// Surface width.
    pub width: f64,
    /// Plot padding.
    pub padding: Padding,
    /// Score domain overrides.
    pub domains: DomainOverrides,
    /// Output range overrides.
    pub ranges: RangeOverrides,
    /// Skip drawing the score axis.
    pub no_axes: bool,
    /// Gap between bars (bar chart only).
    pub bar_padding: f64,
    /// Bar stroke width (bar chart only).
    pub stroke: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            height: 200.0,
            width: 500.0,
            padding: Padding::default(),
            domains: DomainOverrides::default(),
            ranges: RangeOverrides::default(),
            no_axes: false,
            bar_padding: 1.0,
            stroke: 1.0,
        }
    }
}

impl ChartOptions {
    /// Sets the surface size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the plot padding.
    pub fn with_padding(mut self, x: f64, y: f64) -> Self {
        self.padding = Padding { x, y };
        self
    }

    /// Sets the score domain overrides.
    pub fn with_domains(mut self, domains: DomainOverrides) -> Self {
        self.domains = domains;
        self
    }

    /// Sets the output range overrides.
    pub fn with_ranges(mut self, ranges: RangeOverrides) -> Self {
        self.ranges = ranges;
        self
    }

    /// Enables or disables the score axis.
    pub fn with_axes(mut self, axes: bool) -> Self {
        self.no_axes = !axes;
        self
    }

    /// Sets the gap between bars.
    pub fn with_bar_padding(mut self, bar_padding: f64) -> Self {
        self.bar_padding = bar_padding;
        self
    }

    /// Sets the bar stroke width.
    pub fn with_stroke(mut self, stroke: f64) -> Self {
        self.stroke = stroke;
        self
    }

    /// Baseline pixel of the plot: `height - padding.y`.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding.y
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let o = ChartOptions::default();
        assert_eq!((o.width, o.height), (500.0, 200.0));
        assert_eq!(o.padding, Padding { x: 30.0, y: 30.0 });
        assert_eq!((o.bar_padding, o.stroke), (1.0, 1.0));
        assert!(!o.no_axes);
        assert_eq!(o.baseline(), 170.0);
    }

    #[test]
    fn explicit_domain_beats_overrides_beats_defaults() {
        let overrides = DomainOverrides {
            min: Some(-50.0),
            max: None,
            med: Some(5.0),
        };
        assert_eq!(
            overrides.resolve(None, None, None),
            Domain::new(-50.0, 100.0, 5.0)
        );
        assert_eq!(
            overrides.resolve(Some(-10.0), Some(10.0), None),
            Domain::new(-10.0, 10.0, 5.0)
        );
        assert_eq!(
            DomainOverrides::default().resolve(None, None, None),
            Domain::SCORE
        );
    }
}
