// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: domains, linear pixel mappings and the score color ramp.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use peniko::Color;
use peniko::color::palette::css;

/// An input domain with a median, as used by the score axis.
///
/// The median only matters for the color ramp; positional scales use `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Midpoint of the color ramp.
    pub med: f64,
}

impl Domain {
    /// The full left–right score axis: `[-100, 100]` with median `0`.
    pub const SCORE: Self = Self::new(-100.0, 100.0, 0.0);

    /// Creates a domain.
    pub const fn new(min: f64, max: f64, med: f64) -> Self {
        Self { min, max, med }
    }

    /// Returns `(min, max)`.
    pub fn extent(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::SCORE
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`min == max`) maps every input to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0 + (r1 - r0) / 2.0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl Default for ScaleLinear {
    fn default() -> Self {
        Self::new((0.0, 1.0), (0.0, 1.0))
    }
}

/// A three-stop color ramp over `(min, med, max)`: red, gray, green.
///
/// Interpolation happens per sRGB channel. Values outside the domain clamp to the end colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleColor {
    domain: Domain,
    stops: [Color; 3],
}

impl ScaleColor {
    /// Creates the red–gray–green ramp for `domain`.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            stops: [css::RED, css::GRAY, css::GREEN],
        }
    }

    /// Replaces the three stop colors.
    pub fn with_stops(mut self, low: Color, mid: Color, high: Color) -> Self {
        self.stops = [low, mid, high];
        self
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Maps a value to a color.
    pub fn map(&self, x: f64) -> Color {
        let Domain { min, max, med } = self.domain;
        let [low, mid, high] = self.stops;
        if x <= med {
            lerp_rgb(low, mid, segment_t(x, min, med))
        } else {
            lerp_rgb(mid, high, segment_t(x, med, max))
        }
    }
}

impl Default for ScaleColor {
    fn default() -> Self {
        Self::new(Domain::SCORE)
    }
}

fn segment_t(x: f64, d0: f64, d1: f64) -> f64 {
    let denom = d1 - d0;
    if denom == 0.0 {
        return 0.5;
    }
    let t = (x - d0) / denom;
    if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) }
}

fn lerp_rgb(a: Color, b: Color, t: f64) -> Color {
    let a = a.to_rgba8();
    let b = b.to_rgba8();
    let channel = |x: u8, y: u8| {
        let v = f64::from(x) + (f64::from(y) - f64::from(x)) * t;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "t is clamped to [0, 1], so v stays within the u8 channel range"
        )]
        {
            v.round().clamp(0.0, 255.0) as u8
        }
    };
    Color::from_rgba8(
        channel(a.r, b.r),
        channel(a.g, b.g),
        channel(a.b, b.b),
        channel(a.a, b.a),
    )
}

/// Returns `(min, max)` over the finite values, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    // Ticks stay inside the domain, like the axis they label.
    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let n_f = (stop - start).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}
