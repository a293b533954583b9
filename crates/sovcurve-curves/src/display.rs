//! Presentation rounding.
//!
//! Model arithmetic stays in `f64` fractions throughout. These helpers are
//! applied once, when a value leaves the library, and their output is never
//! fed back into a computation.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Decimal places for curve yields in percent.
pub const YIELD_PERCENT_DP: u32 = 3;

/// Decimal places for the reference bond's yield in percent.
pub const REFERENCE_YIELD_PERCENT_DP: u32 = 4;

/// Decimal places for model parameters in human-facing output.
pub const PARAMETER_DISPLAY_DP: u32 = 4;

/// Decimal places for model parameters in machine-readable output.
pub const PARAMETER_API_DP: u32 = 6;

/// Rounds to `dp` decimal places, ties to even.
///
/// Values `Decimal` cannot represent (NaN, infinities, beyond ~7.9e28) are
/// returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Converts a fraction to percent, rounded to `dp` decimal places.
pub fn to_percent(fraction: f64, dp: u32) -> f64 {
    round_dp(fraction * 100.0, dp)
}
