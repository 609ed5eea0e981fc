//! The trading-cycle core.
//!
//! One `AssetTrader` owns one asset's state and runs one decision cycle per
//! invocation:
//!
//! 1. **Refresh** balance, position flag, candle window and last executed
//!    prices from the exchange (transient failures skip the cycle).
//! 2. **Stop-loss sentinel**: unconditional market exit on a two-candle
//!    confirmed drop below the stop price.
//! 3. **Take-profit sentinel**: tiered partial market exits at configured
//!    profit percentages.
//! 4. **Strategy vote**: primary strategy with optional fallback.
//! 5. **Stale-order reconciliation**: cancel open orders on the decision's
//!    side, keeping track of partially executed quantity.
//! 6. **Action**: open with a limited buy while flat, close with a limited
//!    sell while long, otherwise hold.
//!
//! Exactly one of the exits/flips happens per cycle. The engine talks to the
//! exchange through the `ExchangeGateway` trait so the whole state machine
//! is testable against a scripted gateway.

mod config;
mod dispatch;
mod engine;
mod error;
mod gateway;
mod position;
mod precision;
mod risk;
mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{AssetConfig, TakeProfitTier};
pub use engine::{AssetTrader, CycleOutcome};
pub use error::TraderError;
pub use gateway::ExchangeGateway;
pub use position::is_long_position;
pub use precision::{adjust_to_step, step_decimals};
pub use state::TraderState;
