//! Per-asset trading configuration.

use crate::error::TraderError;
use model::CandleInterval;
use rust_decimal::Decimal;
use std::time::Duration;
use strategy::StrategyVoter;

/// One take-profit tier: at `trigger_pct`% gain, sell `sell_pct`% of the
/// wallet balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeProfitTier {
    /// Price gain over the last buy, in percent, that arms this tier.
    pub trigger_pct: Decimal,
    /// Share of the wallet balance to sell, in percent.
    pub sell_pct: Decimal,
}

impl TakeProfitTier {
    pub fn new(trigger_pct: Decimal, sell_pct: Decimal) -> Self {
        Self {
            trigger_pct,
            sell_pct,
        }
    }
}

/// Immutable configuration for one traded asset.
///
/// Percentages are kept in base-100 form as configured; the fraction
/// accessors convert once at the point of use.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Base asset code (e.g. "ADA").
    pub asset: String,
    /// Trading pair symbol (e.g. "ADAUSDT").
    pub symbol: String,
    /// Candle interval driving the decisions.
    pub interval: CandleInterval,
    /// Base quantity for opening orders, in the base asset.
    pub traded_quantity: Decimal,
    /// Largest loss accepted when selling with a limit order, in percent.
    /// Negative values demand a profit.
    pub acceptable_loss_pct: Decimal,
    /// Drop from the last buy price that forces a market exit, in percent.
    pub stop_loss_pct: Decimal,
    /// Ordered take-profit tiers.
    pub take_profit_tiers: Vec<TakeProfitTier>,
    /// Wait between ordinary cycles.
    pub poll_interval: Duration,
    /// Wait after a position-flipping order.
    pub post_order_delay: Duration,
    /// Strategy arbitration.
    pub voter: StrategyVoter,
}

impl AssetConfig {
    /// `acceptable_loss_pct` as a fraction of 1.
    pub fn acceptable_loss_fraction(&self) -> Decimal {
        self.acceptable_loss_pct / Decimal::ONE_HUNDRED
    }

    /// `stop_loss_pct` as a fraction of 1.
    pub fn stop_loss_fraction(&self) -> Decimal {
        self.stop_loss_pct / Decimal::ONE_HUNDRED
    }

    /// Reject configurations that cannot trade sensibly.
    pub fn validate(&self) -> Result<(), TraderError> {
        if self.asset.is_empty() || self.symbol.is_empty() {
            return Err(TraderError::Config("asset and symbol must be set".into()));
        }
        if self.traded_quantity <= Decimal::ZERO {
            return Err(TraderError::Config(format!(
                "{}: traded_quantity must be positive",
                self.symbol
            )));
        }
        if self.stop_loss_pct <= Decimal::ZERO || self.stop_loss_pct >= Decimal::ONE_HUNDRED {
            return Err(TraderError::Config(format!(
                "{}: stop_loss_pct must be between 0 and 100",
                self.symbol
            )));
        }
        if self.acceptable_loss_pct >= Decimal::ONE_HUNDRED {
            return Err(TraderError::Config(format!(
                "{}: acceptable_loss_pct must be below 100",
                self.symbol
            )));
        }
        for (i, tier) in self.take_profit_tiers.iter().enumerate() {
            if tier.trigger_pct < Decimal::ZERO {
                return Err(TraderError::Config(format!(
                    "{}: take-profit tier {} trigger must not be negative",
                    self.symbol, i
                )));
            }
            if tier.sell_pct <= Decimal::ZERO || tier.sell_pct > Decimal::ONE_HUNDRED {
                return Err(TraderError::Config(format!(
                    "{}: take-profit tier {} sell share must be in (0, 100]",
                    self.symbol, i
                )));
            }
        }
        self.voter.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use strategy::StrategyKind;

    fn config() -> AssetConfig {
        AssetConfig {
            asset: "ADA".into(),
            symbol: "ADAUSDT".into(),
            interval: CandleInterval::FifteenMinutes,
            traded_quantity: dec!(100),
            acceptable_loss_pct: dec!(0.5),
            stop_loss_pct: dec!(3.5),
            take_profit_tiers: vec![
                TakeProfitTier::new(dec!(2), dec!(50)),
                TakeProfitTier::new(dec!(4), dec!(50)),
                TakeProfitTier::new(dec!(8), dec!(100)),
            ],
            poll_interval: Duration::from_secs(1800),
            post_order_delay: Duration::from_secs(3600),
            voter: StrategyVoter::new(
                StrategyKind::MovingAverage {
                    fast_window: 7,
                    slow_window: 40,
                },
                None,
                true,
            ),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_fractions() {
        let config = config();
        assert_eq!(config.stop_loss_fraction(), dec!(0.035));
        assert_eq!(config.acceptable_loss_fraction(), dec!(0.005));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut config = config();
        config.traded_quantity = dec!(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stop_loss_bounds() {
        let mut config = config();
        config.stop_loss_pct = dec!(0);
        assert!(config.validate().is_err());

        config.stop_loss_pct = dec!(100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_acceptable_loss_allowed() {
        // A negative acceptable loss means the bot only sells at a profit.
        let mut config = config();
        config.acceptable_loss_pct = dec!(-1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_tier_rejected() {
        let mut config = config();
        config.take_profit_tiers = vec![TakeProfitTier::new(dec!(2), dec!(150))];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_strategy_rejected() {
        let mut config = config();
        config.voter = StrategyVoter::new(
            StrategyKind::MovingAverage {
                fast_window: 40,
                slow_window: 7,
            },
            None,
            false,
        );
        assert!(matches!(config.validate(), Err(TraderError::Strategy(_))));
    }
}
