//! Rounding helpers for aggregate reconciliation figures

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, Zero};

/// Round a decimal to the given number of fractional digits.
///
/// Halves round toward positive infinity, matching how the aggregate totals
/// are reported.
pub fn round_decimal(value: &BigDecimal, places: i64) -> BigDecimal {
    let mode = if *value < BigDecimal::zero() {
        RoundingMode::HalfDown
    } else {
        RoundingMode::HalfUp
    };
    value.with_scale_round(places, mode)
}

/// Round a non-negative percentage to one decimal place.
pub fn round_rate(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
