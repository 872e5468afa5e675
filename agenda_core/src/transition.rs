// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed attribute interpolation.
//!
//! A transition is a set of [`Tween`]s, one per `(mark, attribute)` pair. Each tween waits for
//! its delay, captures the attribute's value at that moment, and interpolates towards its
//! target over its duration.
//!
//! Tweens are never cancelled. When several tweens drive the same attribute at once, the one
//! scheduled last writes last and therefore wins for that frame; an older tween that outlives
//! a newer one takes over again until its own end.

use core::time::Duration;

use crate::{Attr, MarkId};

/// Easing curve applied to normalized time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cubic ease in and out (slow start and end).
    #[default]
    CubicInOut,
}

impl Easing {
    /// Applies the curve to `t`, clamped to `0..=1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
        }
    }
}

/// Timing for a transition over an ordered group of marks.
///
/// Mark `i` of the group starts at `delay + i * stagger` after scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSpec {
    /// Delay before the first mark starts.
    pub delay: Duration,
    /// Extra delay per mark index.
    pub stagger: Duration,
    /// Interpolation time per mark.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl TransitionSpec {
    /// Creates a transition of the given duration with no delay or stagger.
    pub fn new(duration: Duration) -> Self {
        Self {
            delay: Duration::ZERO,
            stagger: Duration::ZERO,
            duration,
            easing: Easing::default(),
        }
    }

    /// Sets the fixed delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the per-index stagger.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns the start offset for the mark at `index`.
    pub fn start_offset(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay
            .saturating_add(self.stagger.checked_mul(index).unwrap_or(Duration::MAX))
    }
}

/// One scheduled attribute interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    /// Scheduling order; later tweens win while overlapping.
    pub seq: u64,
    /// Target mark.
    pub id: MarkId,
    /// Target attribute.
    pub attr: Attr,
    /// Absolute start time.
    pub start: Duration,
    /// Interpolation time.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
    /// Value captured when the tween started; `None` until then.
    pub from: Option<f64>,
    /// Final value.
    pub to: f64,
}

impl Tween {
    /// Returns the absolute end time.
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }

    /// Returns the interpolated value at `now`, given the captured start value.
    pub fn value_at(&self, from: f64, now: Duration) -> f64 {
        if now >= self.end() || self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = self.easing.apply(elapsed / self.duration.as_secs_f64());
        from + (self.to - from) * t
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn cubic_in_out_is_symmetric_and_pinned() {
        let e = Easing::CubicInOut;
        assert_eq!(e.apply(0.0), 0.0, "starts at zero");
        assert_eq!(e.apply(1.0), 1.0, "ends at one");
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12, "midpoint is half way");
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12, "point symmetric");
    }

    #[test]
    fn stagger_offsets_grow_with_index() {
        let spec = TransitionSpec::new(Duration::from_millis(750))
            .with_stagger(Duration::from_millis(50));
        assert_eq!(spec.start_offset(0), Duration::ZERO);
        assert_eq!(spec.start_offset(3), Duration::from_millis(150));
    }

    #[test]
    fn tween_interpolates_between_capture_and_target() {
        let tween = Tween {
            seq: 0,
            id: MarkId::from_raw(1),
            attr: Attr::R,
            start: Duration::from_millis(100),
            duration: Duration::from_millis(100),
            easing: Easing::Linear,
            from: None,
            to: 10.0,
        };
        assert_eq!(tween.value_at(0.0, Duration::from_millis(150)), 5.0);
        assert_eq!(tween.value_at(0.0, Duration::from_millis(400)), 10.0);
    }
}
