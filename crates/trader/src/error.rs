//! Trader error types.

use thiserror::Error;

/// Fatal trader errors.
///
/// Transient exchange failures never surface here: the engine logs them and
/// skips the cycle. What does surface halts the affected asset's loop —
/// configuration mistakes and startup failures the operator must see.
#[derive(Debug, Error)]
pub enum TraderError {
    /// Asset configuration failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Strategy parameters are invalid.
    #[error(transparent)]
    Strategy(#[from] strategy::StrategyError),

    /// Exchange failure during startup (symbol filter lookup).
    #[error("exchange error: {0}")]
    Exchange(#[from] binance_spot::ExchangeError),
}
