//! Fixed-point conversion between measured values and sensor ticks.
//!
//! One tick is 1/16 of a unit (0.0625), the native quantization step of the
//! temperature sensor.

use num_traits::float::FloatCore;

/// Ticks per whole unit of the measured quantity.
pub const TICKS_PER_UNIT: i32 = 16;

/// Value of a single tick.
pub const TICK: f32 = 1.0 / TICKS_PER_UNIT as f32;

/// Convert a value to the nearest tick, rounding half away from zero.
#[inline]
pub fn to_ticks(value: f32) -> i32 {
    FloatCore::round(value * TICKS_PER_UNIT as f32) as i32
}

/// Convert ticks back to a value.
#[inline]
pub fn from_ticks(ticks: i32) -> f32 {
    ticks as f32 / TICKS_PER_UNIT as f32
}

/// Average of `sum` over `count` ticks, rounded to the nearest tick.
#[inline]
pub(crate) fn rounded_mean(sum: i64, count: usize) -> i32 {
    FloatCore::round(sum as f64 / count as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_sixteenths() {
        assert_eq!(to_ticks(20.0), 320);
        assert_eq!(to_ticks(20.5), 328);
        assert_eq!(to_ticks(-0.0625), -1);
        assert_eq!(from_ticks(336), 21.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.03125 is exactly half a tick
        assert_eq!(to_ticks(0.03125), 1);
        assert_eq!(to_ticks(-0.03125), -1);
        assert_eq!(rounded_mean(3, 2), 2);
        assert_eq!(rounded_mean(-3, 2), -2);
    }
}
