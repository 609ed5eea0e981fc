//! Average True Range.

use crate::moving::sma;
use model::PriceSeries;
use rust_decimal::Decimal;

/// ATR over `window` periods: the moving average of the true range.
///
/// True range for a candle is the greatest of high−low,
/// |high−previous close| and |low−previous close|. The last element
/// corresponds to the latest candle; empty when there is not enough history
/// (`window + 1` candles are needed).
pub fn atr(series: &PriceSeries, window: usize) -> Vec<Decimal> {
    let candles = series.candles();
    if window == 0 || candles.len() < window + 1 {
        return Vec::new();
    }

    let mut true_ranges = Vec::with_capacity(candles.len() - 1);
    for pair in candles.windows(2) {
        let prev_close = pair[0].close;
        let c = &pair[1];
        let tr = (c.high - c.low)
            .max((c.high - prev_close).abs())
            .max((c.low - prev_close).abs());
        true_ranges.push(tr);
    }

    sma(&true_ranges, window)
}
