//! Simple fast/slow moving average comparison.
//!
//! Long while the fast average sits above the slow one, short otherwise.

use crate::signal::Signal;
use indicators::sma;
use model::PriceSeries;
use tracing::debug;

pub(crate) fn decide(series: &PriceSeries, fast_window: usize, slow_window: usize) -> Option<Signal> {
    let closes = series.closes();
    let fast = sma(&closes, fast_window);
    let slow = sma(&closes, slow_window);

    let (last_fast, last_slow) = match (fast.last(), slow.last()) {
        (Some(f), Some(s)) => (*f, *s),
        _ => {
            debug!(strategy = "moving_average", "insufficient history");
            return None;
        }
    };

    let signal = if last_fast > last_slow {
        Signal::Buy
    } else {
        Signal::Sell
    };

    debug!(
        strategy = "moving_average",
        fast = %last_fast,
        slow = %last_slow,
        decision = %signal,
        "evaluated"
    );
    Some(signal)
}
