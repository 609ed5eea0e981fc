//! Price series: the most-recent-N candle window used for every decision.

use crate::candle::Candle;
use rust_decimal::Decimal;

/// A window of candles in ascending time order, refreshed wholesale each
/// cycle rather than appended to incrementally.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Build a series from candles in ascending time order.
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    /// An empty series (no market data yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the whole window with a fresh pull.
    pub fn replace(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// All candles, oldest first.
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// The most recent candle.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Latest close price.
    pub fn latest_close(&self) -> Option<Decimal> {
        self.latest().map(|c| c.close)
    }

    /// Close price `n` candles back from the latest (`0` = latest).
    pub fn close_back(&self, n: usize) -> Option<Decimal> {
        let len = self.candles.len();
        if n >= len {
            return None;
        }
        Some(self.candles[len - 1 - n].close)
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// High prices, oldest first.
    pub fn highs(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.high).collect()
    }

    /// Low prices, oldest first.
    pub fn lows(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.low).collect()
    }

    /// Volumes, oldest first.
    pub fn volumes(&self) -> Vec<Decimal> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
