//! Moving average crossover anticipation.
//!
//! When the fast and slow averages are within a volatility-scaled band of
//! each other, the gradient of the fast average is used to call the
//! crossover before it happens. Outside the band the strategy abstains.

use crate::signal::Signal;
use indicators::{rolling_std, sma};
use model::PriceSeries;
use rust_decimal::Decimal;
use tracing::debug;

pub(crate) fn decide(
    series: &PriceSeries,
    volatility_factor: Decimal,
    fast_window: usize,
    slow_window: usize,
) -> Option<Signal> {
    let closes = series.closes();
    let fast = sma(&closes, fast_window);
    let slow = sma(&closes, slow_window);
    let volatility = rolling_std(&closes, slow_window);

    // Gradients read two points back; the volatility read is one point back.
    if fast.len() < 3 || slow.len() < 3 || volatility.len() < 2 {
        debug!(strategy = "moving_average_anticipation", "insufficient history");
        return None;
    }

    let last_fast = fast[fast.len() - 1];
    let prev_fast = fast[fast.len() - 3];
    let last_slow = slow[slow.len() - 1];
    let prev_slow = slow[slow.len() - 3];
    let last_volatility = volatility[volatility.len() - 2];

    let fast_gradient = last_fast - prev_fast;
    let slow_gradient = last_slow - prev_slow;
    let difference = (last_fast - last_slow).abs();
    let band = last_volatility * volatility_factor;

    let signal = if difference < band {
        if fast_gradient > Decimal::ZERO && fast_gradient > slow_gradient {
            Some(Signal::Buy)
        } else if fast_gradient < Decimal::ZERO && fast_gradient < slow_gradient {
            Some(Signal::Sell)
        } else {
            None
        }
    } else {
        None
    };

    debug!(
        strategy = "moving_average_anticipation",
        fast = %last_fast,
        slow = %last_slow,
        fast_gradient = %fast_gradient,
        slow_gradient = %slow_gradient,
        difference = %difference,
        band = %band,
        decision = ?signal,
        "evaluated"
    );
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testdata::series_from_closes;
    use rust_decimal_macros::dec;

    /// Flat tail then a sharp turn: averages converge while the fast one
    /// accelerates in the turn's direction.
    fn turning_series(up: bool) -> PriceSeries {
        let mut closes: Vec<Decimal> = Vec::new();
        // Alternate around 100 to give the window a nonzero std-dev.
        for i in 0..30 {
            closes.push(if i % 2 == 0 { dec!(100) } else { dec!(101) });
        }
        for i in 1..=5 {
            let step = Decimal::from(i) * dec!(0.8);
            closes.push(if up { dec!(100.5) + step } else { dec!(100.5) - step });
        }
        series_from_closes(&closes)
    }

    #[test]
    fn test_upturn_anticipates_buy() {
        let series = turning_series(true);
        assert_eq!(decide(&series, dec!(5), 3, 10), Some(Signal::Buy));
    }

    #[test]
    fn test_downturn_anticipates_sell() {
        let series = turning_series(false);
        assert_eq!(decide(&series, dec!(5), 3, 10), Some(Signal::Sell));
    }

    #[test]
    fn test_outside_band_abstains() {
        // A tiny factor shrinks the band to nearly nothing, so the averages
        // are never "close" and the strategy abstains.
        let series = turning_series(true);
        assert_eq!(decide(&series, dec!(0.0001), 3, 10), None);
    }

    #[test]
    fn test_insufficient_history_abstains() {
        let series = series_from_closes(&[dec!(100), dec!(101), dec!(102)]);
        assert_eq!(decide(&series, dec!(0.5), 3, 10), None);
    }
}
