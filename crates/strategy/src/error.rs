//! Strategy error types.

use thiserror::Error;

/// Fatal strategy errors.
///
/// These indicate a setup mistake (nonsense parameters), not a runtime
/// market condition, and are allowed to halt the affected asset's loop.
#[derive(Debug, Clone, Error)]
pub enum StrategyError {
    /// Strategy parameters fail validation.
    #[error("invalid strategy parameters for {strategy}: {reason}")]
    InvalidParams {
        /// Strategy name.
        strategy: &'static str,
        /// Why validation failed.
        reason: String,
    },
}

impl StrategyError {
    pub(crate) fn invalid(strategy: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            strategy,
            reason: reason.into(),
        }
    }
}
