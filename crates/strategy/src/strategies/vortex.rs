//! Vortex VI+/VI− dominance.

use crate::signal::Signal;
use indicators::vortex;
use model::PriceSeries;
use tracing::debug;

pub(crate) fn decide(series: &PriceSeries, window: usize) -> Option<Signal> {
    let (vi_plus, vi_minus) = vortex(series, window);
    let plus = *vi_plus.last()?;
    let minus = *vi_minus.last()?;

    let signal = if plus > minus {
        Some(Signal::Buy)
    } else if plus < minus {
        Some(Signal::Sell)
    } else {
        None
    };

    debug!(
        strategy = "vortex",
        vi_plus = %plus,
        vi_minus = %minus,
        decision = ?signal,
        "evaluated"
    );
    signal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::testdata::{falling, rising, series_from_closes};

    #[test]
    fn test_uptrend_buys() {
        let series = series_from_closes(&rising(100, 30));
        assert_eq!(decide(&series, 14), Some(Signal::Buy));
    }

    #[test]
    fn test_downtrend_sells() {
        let series = series_from_closes(&falling(200, 30));
        assert_eq!(decide(&series, 14), Some(Signal::Sell));
    }

    #[test]
    fn test_insufficient_history_is_inconclusive() {
        let series = series_from_closes(&rising(100, 10));
        assert_eq!(decide(&series, 14), None);
    }
}
