//! Order dispatch: market and limit orders with exchange-precision rounding.
//!
//! Failures never cross this boundary as errors: a rejected or impossible
//! order is logged and surfaces as `None`, leaving state for the next cycle
//! to re-evaluate.

use crate::engine::AssetTrader;
use crate::gateway::ExchangeGateway;
use crate::precision::adjust_to_step;
use binance_spot::OrderReceipt;
use model::{OrderSide, OrderType, TimeInForce};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

/// RSI window for the limit-price heuristic.
const LIMIT_RSI_WINDOW: usize = 14;
/// Rolling-average window for the volume comparison.
const LIMIT_VOLUME_WINDOW: usize = 20;

impl<G: ExchangeGateway> AssetTrader<G> {
    /// Buy at market. Defaults to the full tracked balance; rejects when
    /// already long.
    pub async fn buy_market(&mut self, quantity: Option<Decimal>) -> Option<OrderReceipt> {
        if self.state.is_long {
            warn!(symbol = %self.config.symbol, "buy rejected: already long");
            return None;
        }

        let quantity = adjust_to_step(
            quantity.unwrap_or(self.state.balance),
            self.filters.step_size,
        );
        if quantity <= Decimal::ZERO {
            warn!(symbol = %self.config.symbol, "buy rejected: quantity rounds to zero");
            return None;
        }

        match self
            .gateway
            .place_order(
                &self.config.symbol,
                OrderSide::Buy,
                OrderType::Market,
                quantity,
                None,
                None,
            )
            .await
        {
            Ok(receipt) => {
                self.state.is_long = true;
                self.log_order(&receipt);
                Some(receipt)
            }
            Err(e) => {
                error!(symbol = %self.config.symbol, error = %e, "market buy failed");
                None
            }
        }
    }

    /// Sell at market. Defaults to the full tracked balance; rejects when
    /// flat.
    pub async fn sell_market(&mut self, quantity: Option<Decimal>) -> Option<OrderReceipt> {
        if !self.state.is_long {
            warn!(symbol = %self.config.symbol, "sell rejected: position already flat");
            return None;
        }

        let quantity = adjust_to_step(
            quantity.unwrap_or(self.state.balance),
            self.filters.step_size,
        );
        if quantity <= Decimal::ZERO {
            warn!(symbol = %self.config.symbol, "sell rejected: quantity rounds to zero");
            return None;
        }

        match self
            .gateway
            .place_order(
                &self.config.symbol,
                OrderSide::Sell,
                OrderType::Market,
                quantity,
                None,
                None,
            )
            .await
        {
            Ok(receipt) => {
                self.state.is_long = false;
                self.log_order(&receipt);
                Some(receipt)
            }
            Err(e) => {
                error!(symbol = %self.config.symbol, error = %e, "market sell failed");
                None
            }
        }
    }

    /// Limited buy of the configured quantity minus any partial-fill
    /// discount, priced by the heuristic unless an explicit price is given.
    pub async fn buy_limited(&mut self, price: Option<Decimal>) -> Option<OrderReceipt> {
        let limit_price = match price {
            Some(p) => p,
            None => match self.heuristic_limit_price(OrderSide::Buy) {
                Some(p) => p,
                None => {
                    warn!(symbol = %self.config.symbol, "no market data for a limit price");
                    return None;
                }
            },
        };

        let limit_price = adjust_to_step(limit_price, self.filters.tick_size);
        let quantity = adjust_to_step(
            self.config.traded_quantity - self.state.partial_fill_discount,
            self.filters.step_size,
        );
        if quantity <= Decimal::ZERO {
            warn!(symbol = %self.config.symbol, "limit buy skipped: quantity rounds to zero");
            return None;
        }

        info!(
            symbol = %self.config.symbol,
            quantity = %quantity,
            price = %limit_price,
            "sending limit buy"
        );

        match self
            .gateway
            .place_order(
                &self.config.symbol,
                OrderSide::Buy,
                OrderType::Limit,
                quantity,
                Some(limit_price),
                Some(TimeInForce::Gtc),
            )
            .await
        {
            Ok(receipt) => {
                self.state.is_long = true;
                self.log_order(&receipt);
                Some(receipt)
            }
            Err(e) => {
                error!(symbol = %self.config.symbol, error = %e, "limit buy failed");
                None
            }
        }
    }

    /// Limited sell of the full balance, priced by the heuristic unless an
    /// explicit price is given. Heuristic prices never fall below the
    /// acceptable-loss floor.
    pub async fn sell_limited(&mut self, price: Option<Decimal>) -> Option<OrderReceipt> {
        let limit_price = match price {
            Some(p) => p,
            None => {
                let Some(mut p) = self.heuristic_limit_price(OrderSide::Sell) else {
                    warn!(symbol = %self.config.symbol, "no market data for a limit price");
                    return None;
                };
                let floor = self.minimum_sell_price();
                if p < floor {
                    info!(
                        symbol = %self.config.symbol,
                        from = %p,
                        to = %floor,
                        "limit sell clamped to the acceptable-loss floor"
                    );
                    p = floor;
                }
                p
            }
        };

        let limit_price = adjust_to_step(limit_price, self.filters.tick_size);
        let quantity = adjust_to_step(self.state.balance, self.filters.step_size);
        if quantity <= Decimal::ZERO {
            warn!(symbol = %self.config.symbol, "limit sell skipped: quantity rounds to zero");
            return None;
        }

        info!(
            symbol = %self.config.symbol,
            quantity = %quantity,
            price = %limit_price,
            "sending limit sell"
        );

        match self
            .gateway
            .place_order(
                &self.config.symbol,
                OrderSide::Sell,
                OrderType::Limit,
                quantity,
                Some(limit_price),
                Some(TimeInForce::Gtc),
            )
            .await
        {
            Ok(receipt) => {
                self.state.is_long = false;
                self.log_order(&receipt);
                Some(receipt)
            }
            Err(e) => {
                error!(symbol = %self.config.symbol, error = %e, "limit sell failed");
                None
            }
        }
    }

    /// Cancel every open order for the symbol, one at a time. Per-order
    /// failures are logged and skipped.
    pub(crate) async fn cancel_all_orders(&mut self) -> usize {
        let orders = match self.gateway.open_orders(&self.config.symbol).await {
            Ok(orders) => orders,
            Err(e) => {
                warn!(symbol = %self.config.symbol, error = %e, "failed to list open orders");
                return 0;
            }
        };

        let mut canceled = 0;
        for order in orders {
            match self.gateway.cancel_order(&self.config.symbol, order.order_id).await {
                Ok(()) => {
                    info!(symbol = %self.config.symbol, order_id = order.order_id, "order canceled");
                    canceled += 1;
                }
                Err(e) => {
                    warn!(
                        symbol = %self.config.symbol,
                        order_id = order.order_id,
                        error = %e,
                        "failed to cancel order"
                    );
                }
            }
        }
        canceled
    }

    /// Lowest sell price the configuration accepts.
    pub(crate) fn minimum_sell_price(&self) -> Decimal {
        self.state.last_buy_price * (Decimal::ONE - self.config.acceptable_loss_fraction())
    }

    /// Derive a limit price from the latest close, offset by a momentum and
    /// volume read: tight offsets in oversold/quiet markets, a wider one
    /// when volume runs hot.
    fn heuristic_limit_price(&self, side: OrderSide) -> Option<Decimal> {
        let closes = self.state.series.closes();
        let volumes = self.state.series.volumes();
        let close = *closes.last()?;
        let volume = *volumes.last()?;
        let avg_volume = indicators::sma(&volumes, LIMIT_VOLUME_WINDOW).last().copied()?;
        let last_rsi = indicators::rsi(&closes, LIMIT_RSI_WINDOW).last().copied()?;

        let oversold = Decimal::from(30);
        let overbought = Decimal::from(70);
        let tight = close * Decimal::new(2, 3); // 0.2%
        let wide = close * Decimal::new(5, 3); // 0.5%

        let price = match side {
            OrderSide::Buy => {
                if last_rsi < oversold {
                    close - tight
                } else if volume < avg_volume {
                    close + tight
                } else {
                    close + wide
                }
            }
            OrderSide::Sell => {
                if last_rsi > overbought {
                    close + tight
                } else if volume < avg_volume {
                    close - tight
                } else {
                    close - wide
                }
            }
        };

        debug!(
            symbol = %self.config.symbol,
            side = %side,
            rsi = %last_rsi,
            volume = %volume,
            avg_volume = %avg_volume,
            close = %close,
            price = %price,
            "derived limit price"
        );
        Some(price)
    }

    /// Audit log for an accepted order.
    pub(crate) fn log_order(&self, receipt: &OrderReceipt) {
        let time = chrono::DateTime::from_timestamp_millis(receipt.transact_time)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| receipt.transact_time.to_string());

        info!(
            symbol = %receipt.symbol,
            side = %receipt.side,
            order_type = %receipt.order_type,
            status = %receipt.status,
            executed_qty = %receipt.executed_qty,
            price = %receipt.price,
            fill_price = ?receipt.first_fill_price(),
            quote_value = %receipt.cummulative_quote_qty,
            time = %time,
            "order executed"
        );
    }
}
