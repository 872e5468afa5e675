// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value with just enough decimals to tell neighbouring ticks apart.
///
/// `step` is the distance between ticks; a step of `20` prints integers, a step of `0.5`
/// prints one decimal. Negative zero prints as `0`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = precision_for_step(step);
    let s = format!("{v:.decimals$}");
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        return String::from(&s[1..]);
    }
    s
}

fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let p = -(step.log10() + 0.01).floor();
    if p <= 0.0 {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "p is positive and capped at 20"
        )]
        {
            p.min(20.0) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_print_integers() {
        assert_eq!(format_tick_with_step(-100.0, 20.0), "-100");
        assert_eq!(format_tick_with_step(40.0, 20.0), "40");
    }

    #[test]
    fn fractional_steps_print_decimals() {
        assert_eq!(format_tick_with_step(1.5, 0.5), "1.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_tick_with_step(-0.0, 20.0), "0");
        assert_eq!(format_tick_with_step(-0.0001, 0.5), "0.0");
    }
}
