//! Position derivation and open-order reconciliation.

use crate::engine::{AssetTrader, CANDLE_HISTORY_LIMIT, ORDER_HISTORY_LIMIT};
use crate::gateway::ExchangeGateway;
use binance_spot::{ExchangeError, OrderRecord};
use model::{OrderSide, OrderStatus};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Long iff the wallet holds at least one tradable step.
///
/// The position is derived from the authoritative exchange balance every
/// cycle; it is never trusted across cycles.
pub fn is_long_position(balance: Decimal, step_size: Decimal) -> bool {
    balance >= step_size
}

/// Price of the most recent fully executed order of a side, derived as
/// cumulative quote value over executed quantity.
pub(crate) fn last_filled_price(history: &[OrderRecord], side: OrderSide) -> Option<Decimal> {
    history
        .iter()
        .filter(|o| o.side == side && o.status == OrderStatus::Filled)
        .max_by_key(|o| o.time)
        .and_then(|o| o.executed_price())
}

impl<G: ExchangeGateway> AssetTrader<G> {
    /// Pull fresh state from the exchange.
    ///
    /// Returns false when any fetch failed; the cycle is then skipped and
    /// every state field keeps its previous value.
    pub(crate) async fn refresh(&mut self) -> bool {
        match self.pull_state().await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    symbol = %self.config.symbol,
                    error = %e,
                    "refresh failed, skipping cycle"
                );
                false
            }
        }
    }

    async fn pull_state(&mut self) -> Result<(), ExchangeError> {
        let balance = self.gateway.asset_balance(&self.config.asset).await?;
        self.state.balance = balance.total();
        self.state.is_long = is_long_position(self.state.balance, self.filters.step_size);

        if !self.state.is_long && self.state.take_profit_index != 0 {
            debug!(symbol = %self.config.symbol, "position flat, take-profit ladder reset");
            self.state.take_profit_index = 0;
        }

        let candles = self
            .gateway
            .candles(&self.config.symbol, self.config.interval, CANDLE_HISTORY_LIMIT)
            .await?;
        self.state.series.replace(candles);

        let history = self
            .gateway
            .order_history(&self.config.symbol, ORDER_HISTORY_LIMIT)
            .await?;
        self.state.last_buy_price =
            last_filled_price(&history, OrderSide::Buy).unwrap_or(Decimal::ZERO);
        self.state.last_sell_price =
            last_filled_price(&history, OrderSide::Sell).unwrap_or(Decimal::ZERO);

        debug!(
            symbol = %self.config.symbol,
            candles = self.state.series.len(),
            last_buy_price = %self.state.last_buy_price,
            last_sell_price = %self.state.last_sell_price,
            "market state pulled"
        );
        Ok(())
    }

    /// Scan open orders of one side, accumulating partially executed
    /// quantity into the fill discount.
    ///
    /// For buy orders the highest partially executed price becomes the cost
    /// basis, a conservative choice for the stop-loss. Returns whether any
    /// open order of that side exists; the caller is expected to cancel all
    /// open orders before placing a new one.
    pub(crate) async fn reconcile_open_orders(&mut self, side: OrderSide) -> bool {
        self.state.partial_fill_discount = Decimal::ZERO;

        let orders = match self.gateway.open_orders(&self.config.symbol).await {
            Ok(orders) => orders,
            Err(e) => {
                warn!(
                    symbol = %self.config.symbol,
                    error = %e,
                    "failed to list open orders"
                );
                return false;
            }
        };

        let matching: Vec<_> = orders.into_iter().filter(|o| o.side == side).collect();
        if matching.is_empty() {
            debug!(symbol = %self.config.symbol, side = %side, "no stale open orders");
            return false;
        }

        if side == OrderSide::Buy {
            self.state.last_buy_price = Decimal::ZERO;
        }

        for order in &matching {
            self.state.partial_fill_discount += order.executed_qty;
            if side == OrderSide::Buy
                && order.executed_qty > Decimal::ZERO
                && order.price > self.state.last_buy_price
            {
                self.state.last_buy_price = order.price;
            }
            info!(
                symbol = %self.config.symbol,
                order_id = order.order_id,
                side = %order.side,
                price = %order.price,
                orig_qty = %order.orig_qty,
                executed_qty = %order.executed_qty,
                "stale open order"
            );
        }

        info!(
            symbol = %self.config.symbol,
            partial_fill_discount = %self.state.partial_fill_discount,
            "stale orders reconciled"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{open_order, order_record, test_trader, MockGateway};
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_derivation() {
        // Long iff balance >= step.
        assert!(is_long_position(dec!(0.1), dec!(0.1)));
        assert!(is_long_position(dec!(5), dec!(0.1)));
        assert!(!is_long_position(dec!(0.05), dec!(0.1)));
        assert!(!is_long_position(dec!(0), dec!(0.1)));
    }

    #[test]
    fn test_last_filled_price_takes_most_recent() {
        let history = vec![
            order_record(1, OrderSide::Buy, OrderStatus::Filled, 1_000, dec!(90), dec!(10)),
            order_record(2, OrderSide::Buy, OrderStatus::Filled, 3_000, dec!(110), dec!(10)),
            order_record(3, OrderSide::Buy, OrderStatus::Canceled, 5_000, dec!(120), dec!(10)),
            order_record(4, OrderSide::Sell, OrderStatus::Filled, 4_000, dec!(105), dec!(10)),
        ];

        // The canceled order and the sell are ignored; order 2 wins on time.
        assert_eq!(last_filled_price(&history, OrderSide::Buy), Some(dec!(110)));
        assert_eq!(last_filled_price(&history, OrderSide::Sell), Some(dec!(105)));
    }

    #[test]
    fn test_last_filled_price_empty_history() {
        assert_eq!(last_filled_price(&[], OrderSide::Buy), None);
    }

    #[tokio::test]
    async fn test_reconcile_accumulates_partials_and_max_price() {
        let gateway = MockGateway::new();
        gateway.set_open_orders(vec![
            open_order(1, OrderSide::Buy, dec!(98), dec!(50), dec!(10)),
            open_order(2, OrderSide::Buy, dec!(101), dec!(50), dec!(25)),
            open_order(3, OrderSide::Sell, dec!(110), dec!(50), dec!(5)),
        ]);
        let mut trader = test_trader(gateway);
        trader.state.last_buy_price = dec!(90);

        let has_open = trader.reconcile_open_orders(OrderSide::Buy).await;

        assert!(has_open);
        // Only the buy orders count, and the highest partial price wins.
        assert_eq!(trader.state.partial_fill_discount, dec!(35));
        assert_eq!(trader.state.last_buy_price, dec!(101));
    }

    #[tokio::test]
    async fn test_reconcile_sell_side_leaves_buy_price() {
        let gateway = MockGateway::new();
        gateway.set_open_orders(vec![open_order(
            3,
            OrderSide::Sell,
            dec!(110),
            dec!(50),
            dec!(5),
        )]);
        let mut trader = test_trader(gateway);
        trader.state.last_buy_price = dec!(90);

        let has_open = trader.reconcile_open_orders(OrderSide::Sell).await;

        assert!(has_open);
        assert_eq!(trader.state.partial_fill_discount, dec!(5));
        assert_eq!(trader.state.last_buy_price, dec!(90));
    }

    #[tokio::test]
    async fn test_reconcile_resets_discount_when_no_orders() {
        let gateway = MockGateway::new();
        let mut trader = test_trader(gateway);
        trader.state.partial_fill_discount = dec!(7);

        let has_open = trader.reconcile_open_orders(OrderSide::Buy).await;

        assert!(!has_open);
        assert_eq!(trader.state.partial_fill_discount, dec!(0));
    }

    #[tokio::test]
    async fn test_untracked_buy_partial_keeps_zero_price() {
        // An open buy order with nothing executed resets the cost basis to
        // zero rather than keeping the stale history value.
        let gateway = MockGateway::new();
        gateway.set_open_orders(vec![open_order(1, OrderSide::Buy, dec!(98), dec!(50), dec!(0))]);
        let mut trader = test_trader(gateway);
        trader.state.last_buy_price = dec!(90);

        trader.reconcile_open_orders(OrderSide::Buy).await;

        assert_eq!(trader.state.last_buy_price, dec!(0));
    }
}
