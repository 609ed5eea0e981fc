//! UT Bot: ATR trailing-stop crossover.
//!
//! A trailing stop follows the price at `multiplier * ATR`. The position
//! flips long when the close crosses above the stop and flat when it
//! crosses below; between crossings the previous regime holds.

use crate::signal::Signal;
use indicators::atr;
use model::PriceSeries;
use rust_decimal::Decimal;
use tracing::debug;

pub(crate) fn decide(
    series: &PriceSeries,
    atr_period: usize,
    atr_multiplier: Decimal,
) -> Option<Signal> {
    let closes = series.closes();
    let atr_values = atr(series, atr_period);
    if atr_values.is_empty() {
        debug!(strategy = "ut_bot", "insufficient history");
        return None;
    }

    // First close index with a valid ATR behind it.
    let start = closes.len() - atr_values.len();
    if start == 0 || closes.len() - start < 2 {
        debug!(strategy = "ut_bot", "insufficient history");
        return None;
    }

    let mut stops = vec![Decimal::ZERO; closes.len()];
    for i in start..closes.len() {
        let band = atr_values[i - start] * atr_multiplier;
        let prev_stop = stops[i - 1];

        stops[i] = if closes[i] > prev_stop && closes[i - 1] > prev_stop {
            prev_stop.max(closes[i] - band)
        } else if closes[i] < prev_stop && closes[i - 1] < prev_stop {
            prev_stop.min(closes[i] + band)
        } else if closes[i] > prev_stop {
            closes[i] - band
        } else {
            closes[i] + band
        };
    }

    let mut regime: i8 = 0;
    for i in (start + 1)..closes.len() {
        if closes[i - 1] < stops[i - 1] && closes[i] > stops[i] {
            regime = 1;
        } else if closes[i - 1] > stops[i - 1] && closes[i] < stops[i] {
            regime = -1;
        }
    }

    let signal = if regime == 1 { Signal::Buy } else { Signal::Sell };
    debug!(
        strategy = "ut_bot",
        trailing_stop = %stops[closes.len() - 1],
        close = %closes[closes.len() - 1],
        regime = regime,
        decision = %signal,
        "evaluated"
    );
    Some(signal)
}
