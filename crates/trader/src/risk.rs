//! Risk sentinels: stop-loss and tiered take-profit.
//!
//! Both run every cycle before strategy arbitration and end the cycle when
//! they act.

use crate::engine::{AssetTrader, ORDER_SETTLE_DELAY};
use crate::gateway::ExchangeGateway;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

impl<G: ExchangeGateway> AssetTrader<G> {
    /// Stop-loss: exit the whole position at market when both the latest
    /// and the second-latest close sit below the stop price.
    ///
    /// The two-candle confirmation keeps a single wick from flushing the
    /// position. Returns true when the sentinel fired (the cycle ends),
    /// whether or not the exit order was accepted.
    pub(crate) async fn stop_loss_triggered(&mut self) -> bool {
        if !self.state.is_long || self.state.last_buy_price <= Decimal::ZERO {
            return false;
        }
        let (Some(close), Some(prev_close)) =
            (self.state.series.close_back(0), self.state.series.close_back(1))
        else {
            return false;
        };

        let stop_price =
            self.state.last_buy_price * (Decimal::ONE - self.config.stop_loss_fraction());
        debug!(
            symbol = %self.config.symbol,
            close = %close,
            prev_close = %prev_close,
            stop_price = %stop_price,
            "stop-loss check"
        );

        if close >= stop_price || prev_close >= stop_price {
            return false;
        }

        warn!(
            symbol = %self.config.symbol,
            close = %close,
            stop_price = %stop_price,
            last_buy_price = %self.state.last_buy_price,
            "stop-loss triggered, exiting position at market"
        );
        self.cancel_all_orders().await;
        tokio::time::sleep(ORDER_SETTLE_DELAY).await;
        self.sell_market(None).await;
        true
    }

    /// Take-profit: when the gain over the last buy reaches the current
    /// tier's trigger, sell that tier's share of the wallet at market.
    ///
    /// The ladder only advances on a confirmed fill; a rejected or resting
    /// sell retries the same tier next cycle. Returns true only on a
    /// confirmed fill (the cycle ends).
    pub(crate) async fn take_profit_triggered(&mut self) -> bool {
        if self.state.last_buy_price <= Decimal::ZERO {
            return false;
        }
        let Some(close) = self.state.series.latest_close() else {
            return false;
        };

        let change_pct = (close - self.state.last_buy_price) / self.state.last_buy_price
            * Decimal::ONE_HUNDRED;

        let Some(tier) = self
            .config
            .take_profit_tiers
            .get(self.state.take_profit_index)
            .copied()
        else {
            debug!(symbol = %self.config.symbol, "all take-profit tiers exhausted");
            return false;
        };

        debug!(
            symbol = %self.config.symbol,
            change_pct = %change_pct,
            trigger_pct = %tier.trigger_pct,
            sell_pct = %tier.sell_pct,
            "take-profit check"
        );

        // Compared at two decimals so float-noise near the trigger cannot
        // hold the tier open forever.
        let due = self.state.is_long
            && tier.trigger_pct > Decimal::ZERO
            && change_pct.round_dp(2) >= tier.trigger_pct.round_dp(2);
        if !due {
            return false;
        }

        let quantity = self.state.balance * tier.sell_pct / Decimal::ONE_HUNDRED;
        if quantity <= Decimal::ZERO {
            warn!(symbol = %self.config.symbol, "take-profit quantity is zero, skipping");
            return false;
        }

        info!(
            symbol = %self.config.symbol,
            change_pct = %change_pct,
            trigger_pct = %tier.trigger_pct,
            sell_pct = %tier.sell_pct,
            quantity = %quantity,
            "take-profit tier reached, selling at market"
        );

        match self.sell_market(Some(quantity)).await {
            Some(receipt) if receipt.is_filled() => {
                self.state.take_profit_index += 1;
                info!(
                    symbol = %self.config.symbol,
                    next_tier = self.state.take_profit_index,
                    "take-profit executed, ladder advanced"
                );
                true
            }
            _ => {
                warn!(
                    symbol = %self.config.symbol,
                    "take-profit sell not filled, retrying this tier next cycle"
                );
                false
            }
        }
    }
}
