//! Mutable per-asset trader state.

use model::PriceSeries;
use rust_decimal::Decimal;
use std::time::Duration;

/// State owned exclusively by one asset's engine.
///
/// Nothing here is trusted across cycles as ground truth: `is_long` and
/// `balance` are recomputed from the exchange every refresh, and
/// `partial_fill_discount` is zeroed before every reconciliation. Only the
/// last executed prices and the take-profit ladder position persist.
#[derive(Debug)]
pub struct TraderState {
    /// Whether the wallet currently holds at least one tradable step.
    pub is_long: bool,
    /// Wallet balance of the base asset, free plus locked.
    pub balance: Decimal,
    /// Price of the most recent executed (or best partially executed) buy.
    pub last_buy_price: Decimal,
    /// Price of the most recent executed sell.
    pub last_sell_price: Decimal,
    /// Quantity already executed on a still-open order of the current side,
    /// subtracted from the next order's quantity.
    pub partial_fill_discount: Decimal,
    /// Index of the next take-profit tier; resets to 0 when flat.
    pub take_profit_index: usize,
    /// Wait before the next cycle.
    pub next_sleep: Duration,
    /// Latest candle window.
    pub series: PriceSeries,
}

impl TraderState {
    /// Fresh state sleeping the base interval.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            is_long: false,
            balance: Decimal::ZERO,
            last_buy_price: Decimal::ZERO,
            last_sell_price: Decimal::ZERO,
            partial_fill_discount: Decimal::ZERO,
            take_profit_index: 0,
            next_sleep: poll_interval,
            series: PriceSeries::empty(),
        }
    }
}
