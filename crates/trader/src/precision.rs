//! Exchange-precision rounding.
//!
//! Prices and quantities are always floored to the symbol's tick/step size,
//! never rounded up: a floored value always passes the exchange's precision
//! filter, a rounded one may not.

use rust_decimal::Decimal;

/// Floor `value` to an exact multiple of `step`.
///
/// The result carries the step's own number of decimal places. A
/// non-positive step returns the value unchanged.
pub fn adjust_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    let quantized = (value / step).floor() * step;
    quantized.round_dp(step_decimals(step))
}

/// Number of decimal places implied by a step size (0.001 → 3).
pub fn step_decimals(step: Decimal) -> u32 {
    step.normalize().scale()
}
