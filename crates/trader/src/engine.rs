//! The per-cycle decision engine.

use crate::config::AssetConfig;
use crate::error::TraderError;
use crate::gateway::ExchangeGateway;
use crate::state::TraderState;
use binance_spot::SymbolFilters;
use model::OrderSide;
use std::time::Duration;
use strategy::Signal;
use tracing::{debug, info};

/// Candle window pulled every cycle.
pub(crate) const CANDLE_HISTORY_LIMIT: u32 = 1000;
/// Order history window scanned for the last executed prices.
pub(crate) const ORDER_HISTORY_LIMIT: u32 = 100;
/// Pause after cancelling orders, letting the exchange settle before the
/// follow-up order.
pub(crate) const ORDER_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// What a cycle did. At most one order-producing outcome per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Refresh failed; nothing was evaluated.
    Skipped,
    /// Stop-loss fired and the position was exited at market.
    StopLossExit,
    /// A take-profit tier fired and part of the position was sold.
    TakeProfitExit,
    /// A limited buy was placed to open a position.
    OpenedLong,
    /// A limited sell was placed to close the position.
    ClosedLong,
    /// Nothing to do (decision matched the position, was inconclusive, or
    /// the order was rejected).
    Hold,
}

/// One asset's trading engine: configuration, exchange access and exclusive
/// mutable state.
pub struct AssetTrader<G> {
    pub(crate) config: AssetConfig,
    pub(crate) gateway: G,
    pub(crate) filters: SymbolFilters,
    pub(crate) state: TraderState,
}

impl<G: ExchangeGateway> AssetTrader<G> {
    /// Validate the configuration and fetch the symbol's precision filters.
    pub async fn connect(config: AssetConfig, gateway: G) -> Result<Self, TraderError> {
        config.validate()?;
        let filters = gateway.symbol_filters(&config.symbol).await?;
        info!(
            symbol = %config.symbol,
            tick_size = %filters.tick_size,
            step_size = %filters.step_size,
            "symbol filters loaded"
        );
        Ok(Self::with_filters(config, gateway, filters))
    }

    /// Build an engine with already-known filters.
    pub fn with_filters(config: AssetConfig, gateway: G, filters: SymbolFilters) -> Self {
        let state = TraderState::new(config.poll_interval);
        Self {
            config,
            gateway,
            filters,
            state,
        }
    }

    /// The traded pair symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Wait the scheduler should apply before the next cycle.
    pub fn next_sleep(&self) -> Duration {
        self.state.next_sleep
    }

    /// Read-only view of the engine state.
    pub fn state(&self) -> &TraderState {
        &self.state
    }

    /// Run one full decision cycle.
    ///
    /// Returns what the cycle did; `Err` only for fatal configuration-class
    /// failures (a strategy rejecting its input), which should halt this
    /// asset's loop.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, TraderError> {
        info!(symbol = %self.config.symbol, "cycle start");

        if !self.refresh().await {
            self.state.next_sleep = self.config.poll_interval;
            return Ok(CycleOutcome::Skipped);
        }

        info!(
            symbol = %self.config.symbol,
            position = if self.state.is_long { "long" } else { "flat" },
            balance = %self.state.balance,
            last_buy_price = %self.state.last_buy_price,
            "state refreshed"
        );

        // Sentinels run before any strategy arbitration and end the cycle
        // when they act.
        if self.stop_loss_triggered().await {
            self.state.next_sleep = self.config.poll_interval;
            return Ok(CycleOutcome::StopLossExit);
        }
        if self.state.is_long && self.take_profit_triggered().await {
            self.state.next_sleep = self.config.poll_interval;
            return Ok(CycleOutcome::TakeProfitExit);
        }

        let decision = self.config.voter.vote(&self.state.series)?;
        info!(symbol = %self.config.symbol, decision = ?decision, "final decision");

        // A stale order on the decision's side is cancelled before acting,
        // with its executed quantity carried into the next order.
        if let Some(signal) = decision {
            let side = match signal {
                Signal::Buy => OrderSide::Buy,
                Signal::Sell => OrderSide::Sell,
            };
            if self.reconcile_open_orders(side).await {
                self.cancel_all_orders().await;
                tokio::time::sleep(ORDER_SETTLE_DELAY).await;
            }
        }

        let outcome = match (self.state.is_long, decision) {
            (false, Some(Signal::Buy)) => {
                if self.buy_limited(None).await.is_some() {
                    self.state.next_sleep = self.config.post_order_delay;
                    CycleOutcome::OpenedLong
                } else {
                    self.state.next_sleep = self.config.poll_interval;
                    CycleOutcome::Hold
                }
            }
            (true, Some(Signal::Sell)) => {
                if self.sell_limited(None).await.is_some() {
                    self.state.next_sleep = self.config.post_order_delay;
                    CycleOutcome::ClosedLong
                } else {
                    self.state.next_sleep = self.config.poll_interval;
                    CycleOutcome::Hold
                }
            }
            _ => {
                debug!(
                    symbol = %self.config.symbol,
                    position = if self.state.is_long { "long" } else { "flat" },
                    "holding position"
                );
                self.state.next_sleep = self.config.poll_interval;
                CycleOutcome::Hold
            }
        };

        Ok(outcome)
    }
}
