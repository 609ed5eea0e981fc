//! Primary/fallback strategy arbitration.

use crate::error::StrategyError;
use crate::kind::StrategyKind;
use crate::signal::Signal;
use model::PriceSeries;
use tracing::{debug, info};

/// Runs the primary strategy and, when it is inconclusive, the fallback.
#[derive(Debug, Clone)]
pub struct StrategyVoter {
    primary: StrategyKind,
    fallback: Option<StrategyKind>,
    fallback_enabled: bool,
}

impl StrategyVoter {
    /// Create a voter. `fallback_enabled` gates the fallback even when one
    /// is configured.
    pub fn new(
        primary: StrategyKind,
        fallback: Option<StrategyKind>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            primary,
            fallback,
            fallback_enabled,
        }
    }

    /// The primary strategy.
    pub fn primary(&self) -> &StrategyKind {
        &self.primary
    }

    /// Validate both strategies' parameters.
    pub fn validate(&self) -> Result<(), StrategyError> {
        self.primary.validate()?;
        if let Some(fallback) = &self.fallback {
            fallback.validate()?;
        }
        Ok(())
    }

    /// Final decision for this cycle.
    ///
    /// The primary's verdict stands unless it is inconclusive; then, with the
    /// fallback enabled and configured, the fallback decides. `None` means
    /// hold.
    pub fn vote(&self, series: &PriceSeries) -> Result<Option<Signal>, StrategyError> {
        let decision = self.primary.evaluate(series);
        if decision.is_some() {
            debug!(strategy = self.primary.name(), decision = ?decision, "primary decided");
            return Ok(decision);
        }

        if !self.fallback_enabled {
            return Ok(None);
        }
        let Some(fallback) = &self.fallback else {
            return Ok(None);
        };

        info!(
            primary = self.primary.name(),
            fallback = fallback.name(),
            "primary inconclusive, consulting fallback"
        );
        Ok(fallback.evaluate(series))
    }
}
