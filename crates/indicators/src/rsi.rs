//! Relative Strength Index with Wilder smoothing.

use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// RSI over `window` periods with Wilder's smoothing (ewm alpha = 1/window).
///
/// Output starts at the second input value (the first has no delta); the
/// last element corresponds to the latest input. Empty when fewer than two
/// values are given or the window is zero.
pub fn rsi(values: &[Decimal], window: usize) -> Vec<Decimal> {
    if window == 0 || values.len() < 2 {
        return Vec::new();
    }

    let alpha = Decimal::ONE / Decimal::from(window as u64);
    let one_minus_alpha = Decimal::ONE - alpha;

    let mut out = Vec::with_capacity(values.len() - 1);
    let mut avg_gain = Decimal::ZERO;
    let mut avg_loss = Decimal::ZERO;

    for (i, pair) in values.windows(2).enumerate() {
        let delta = pair[1] - pair[0];
        let gain = delta.max(Decimal::ZERO);
        let loss = (-delta).max(Decimal::ZERO);

        if i == 0 {
            avg_gain = gain;
            avg_loss = loss;
        } else {
            avg_gain = alpha * gain + one_minus_alpha * avg_gain;
            avg_loss = alpha * loss + one_minus_alpha * avg_loss;
        }

        let value = if avg_loss.is_zero() {
            // No losses in the window: maximally overbought.
            HUNDRED
        } else {
            let rs = avg_gain / avg_loss;
            HUNDRED - HUNDRED / (Decimal::ONE + rs)
        };
        out.push(value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_monotonic_rise_is_100() {
        let values: Vec<Decimal> = (1..=20).map(Decimal::from).collect();
        let out = rsi(&values, 14);
        assert_eq!(out.len(), values.len() - 1);
        assert_eq!(*out.last().unwrap(), dec!(100));
    }

    #[test]
    fn test_rsi_monotonic_fall_is_0() {
        let values: Vec<Decimal> = (1..=20).rev().map(Decimal::from).collect();
        let out = rsi(&values, 14);
        assert_eq!(*out.last().unwrap(), dec!(0));
    }

    #[test]
    fn test_rsi_mixed_series_in_range() {
        let values = [
            dec!(10),
            dec!(11),
            dec!(10.5),
            dec!(11.5),
            dec!(11),
            dec!(12),
            dec!(11.8),
            dec!(12.5),
        ];
        let out = rsi(&values, 3);

        for v in &out {
            assert!(*v >= dec!(0) && *v <= dec!(100), "rsi out of range: {}", v);
        }
        // Net-rising series should read above the midline.
        assert!(*out.last().unwrap() > dec!(50));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(rsi(&[dec!(1)], 14).is_empty());
        assert!(rsi(&[], 14).is_empty());
    }
}
