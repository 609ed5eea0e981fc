//! RSI peak/valley regime.
//!
//! The series is scanned for the last overbought excursion (peak) and the
//! last oversold excursion (valley); whichever happened more recently sets
//! the regime: a valley means stay long until the next peak, a peak means
//! stay out until the next valley.

use crate::signal::Signal;
use indicators::rsi;
use model::PriceSeries;
use rust_decimal::Decimal;
use tracing::debug;

pub(crate) fn decide(
    series: &PriceSeries,
    window: usize,
    oversold: Decimal,
    overbought: Decimal,
) -> Option<Signal> {
    let closes = series.closes();
    let values = rsi(&closes, window);
    let last_rsi = *values.last()?;

    let mut last_peak: Option<usize> = None;
    let mut last_valley: Option<usize> = None;
    for (i, value) in values.iter().enumerate() {
        if *value > overbought {
            last_peak = Some(i);
        }
        if *value < oversold {
            last_valley = Some(i);
        }
    }

    let signal = match (last_peak, last_valley) {
        (Some(peak), Some(valley)) => {
            if valley > peak {
                Some(Signal::Buy)
            } else {
                Some(Signal::Sell)
            }
        }
        (None, Some(_)) => Some(Signal::Buy),
        (Some(_), None) => Some(Signal::Sell),
        (None, None) => None,
    };

    debug!(
        strategy = "rsi",
        last_rsi = %last_rsi,
        last_peak = ?last_peak,
        last_valley = ?last_valley,
        decision = ?signal,
        "evaluated"
    );
    signal
}
