//! Moving average crossover confirmed by RSI and volume.
//!
//! A long entry needs the fast average above the slow one, an RSI clear of
//! the oversold zone, and a volume surge above the rolling average. An exit
//! needs only a bearish crossover or an overbought RSI.

use crate::signal::Signal;
use indicators::{rsi, sma};
use model::PriceSeries;
use rust_decimal::Decimal;
use tracing::debug;

#[allow(clippy::too_many_arguments)]
pub(crate) fn decide(
    series: &PriceSeries,
    fast_window: usize,
    slow_window: usize,
    rsi_window: usize,
    oversold: Decimal,
    overbought: Decimal,
    volume_multiplier: Decimal,
) -> Option<Signal> {
    let closes = series.closes();
    let volumes = series.volumes();

    let last_fast = sma(&closes, fast_window).last().copied()?;
    let last_slow = sma(&closes, slow_window).last().copied()?;
    let last_rsi = rsi(&closes, rsi_window).last().copied()?;
    let avg_volume = sma(&volumes, slow_window).last().copied()?;
    let last_volume = *volumes.last()?;

    let buy = last_fast > last_slow
        && last_rsi > oversold
        && last_volume > volume_multiplier * avg_volume;
    let sell = last_fast < last_slow || last_rsi > overbought;

    let signal = if buy {
        Some(Signal::Buy)
    } else if sell {
        Some(Signal::Sell)
    } else {
        None
    };

    debug!(
        strategy = "ma_rsi_volume",
        fast = %last_fast,
        slow = %last_slow,
        rsi = %last_rsi,
        volume = %last_volume,
        avg_volume = %avg_volume,
        decision = ?signal,
        "evaluated"
    );
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testdata::{falling, series_with_volumes};
    use rust_decimal_macros::dec;

    /// Sawtooth climb: +3 then −2, so the trend is up while the RSI stays
    /// between the bands.
    fn sawtooth_up(len: usize) -> Vec<Decimal> {
        let mut closes = vec![dec!(100)];
        for i in 1..len {
            let prev = closes[i - 1];
            closes.push(if i % 2 == 1 { prev + dec!(3) } else { prev - dec!(2) });
        }
        closes
    }

    fn flat_volumes(len: usize) -> Vec<Decimal> {
        vec![dec!(100); len]
    }

    #[test]
    fn test_uptrend_with_volume_surge_buys() {
        let closes = sawtooth_up(50);
        let mut volumes = flat_volumes(50);
        *volumes.last_mut().unwrap() = dec!(500);

        let series = series_with_volumes(&closes, &volumes);
        let signal = decide(&series, 7, 21, 14, dec!(30), dec!(70), dec!(1.5));
        assert_eq!(signal, Some(Signal::Buy));
    }

    #[test]
    fn test_uptrend_without_volume_abstains() {
        let closes = sawtooth_up(50);
        let volumes = flat_volumes(50);

        let series = series_with_volumes(&closes, &volumes);
        let signal = decide(&series, 7, 21, 14, dec!(30), dec!(70), dec!(1.5));
        assert_eq!(signal, None);
    }

    #[test]
    fn test_downtrend_sells() {
        let closes = falling(200, 50);
        let volumes = flat_volumes(50);

        let series = series_with_volumes(&closes, &volumes);
        let signal = decide(&series, 7, 21, 14, dec!(30), dec!(70), dec!(1.5));
        assert_eq!(signal, Some(Signal::Sell));
    }

    #[test]
    fn test_overbought_sells_even_in_uptrend() {
        // A straight climb pins the RSI at 100: overbought forces an exit
        // regardless of the crossover.
        let closes: Vec<Decimal> = (0..50).map(|i| Decimal::from(100 + i)).collect();
        let volumes = flat_volumes(50);

        let series = series_with_volumes(&closes, &volumes);
        let signal = decide(&series, 7, 21, 14, dec!(30), dec!(70), dec!(1.5));
        assert_eq!(signal, Some(Signal::Sell));
    }

    #[test]
    fn test_insufficient_history_is_inconclusive() {
        let closes = sawtooth_up(10);
        let volumes = flat_volumes(10);

        let series = series_with_volumes(&closes, &volumes);
        assert_eq!(decide(&series, 7, 21, 14, dec!(30), dec!(70), dec!(1.5)), None);
    }
}
