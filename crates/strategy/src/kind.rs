//! The closed set of strategies, with enum dispatch.

use crate::error::StrategyError;
use crate::signal::Signal;
use crate::strategies;
use model::PriceSeries;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_fast_window() -> usize {
    7
}

fn default_slow_window() -> usize {
    40
}

fn default_rsi_window() -> usize {
    14
}

fn default_oversold() -> Decimal {
    Decimal::from(30)
}

fn default_overbought() -> Decimal {
    Decimal::from(70)
}

fn default_volume_multiplier() -> Decimal {
    Decimal::new(15, 1) // 1.5
}

fn default_atr_period() -> usize {
    10
}

fn default_atr_multiplier() -> Decimal {
    Decimal::from(2)
}

/// A strategy and its parameters.
///
/// New strategies are added by extending this enum; there is no runtime
/// lookup by name. The serde tag matches the configuration file surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    /// Fast/slow simple moving average comparison.
    MovingAverage {
        #[serde(default = "default_fast_window")]
        fast_window: usize,
        #[serde(default = "default_slow_window")]
        slow_window: usize,
    },
    /// Moving average crossover anticipated by gradient inside a
    /// volatility band.
    MovingAverageAnticipation {
        volatility_factor: Decimal,
        #[serde(default = "default_fast_window")]
        fast_window: usize,
        #[serde(default = "default_slow_window")]
        slow_window: usize,
    },
    /// RSI peak/valley regime: buy after the last oversold excursion,
    /// sell after the last overbought excursion.
    Rsi {
        #[serde(default = "default_rsi_window")]
        window: usize,
        #[serde(default = "default_oversold")]
        oversold: Decimal,
        #[serde(default = "default_overbought")]
        overbought: Decimal,
    },
    /// Vortex VI+/VI− dominance.
    Vortex {
        #[serde(default = "default_rsi_window")]
        window: usize,
    },
    /// Moving average crossover confirmed by RSI and volume.
    MaRsiVolume {
        #[serde(default = "default_fast_window")]
        fast_window: usize,
        #[serde(default = "default_slow_window")]
        slow_window: usize,
        #[serde(default = "default_rsi_window")]
        rsi_window: usize,
        #[serde(default = "default_oversold")]
        oversold: Decimal,
        #[serde(default = "default_overbought")]
        overbought: Decimal,
        #[serde(default = "default_volume_multiplier")]
        volume_multiplier: Decimal,
    },
    /// ATR trailing-stop crossover (UT Bot).
    UtBot {
        #[serde(default = "default_atr_period")]
        atr_period: usize,
        #[serde(default = "default_atr_multiplier")]
        atr_multiplier: Decimal,
    },
}

impl StrategyKind {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MovingAverage { .. } => "moving_average",
            Self::MovingAverageAnticipation { .. } => "moving_average_anticipation",
            Self::Rsi { .. } => "rsi",
            Self::Vortex { .. } => "vortex",
            Self::MaRsiVolume { .. } => "ma_rsi_volume",
            Self::UtBot { .. } => "ut_bot",
        }
    }

    /// Reject nonsense parameters up front.
    pub fn validate(&self) -> Result<(), StrategyError> {
        let name = self.name();
        match self {
            Self::MovingAverage {
                fast_window,
                slow_window,
            } => validate_windows(name, *fast_window, *slow_window),
            Self::MovingAverageAnticipation {
                volatility_factor,
                fast_window,
                slow_window,
            } => {
                validate_windows(name, *fast_window, *slow_window)?;
                if *slow_window < 2 {
                    return Err(StrategyError::invalid(name, "slow_window must be at least 2"));
                }
                if *volatility_factor <= Decimal::ZERO {
                    return Err(StrategyError::invalid(name, "volatility_factor must be positive"));
                }
                Ok(())
            }
            Self::Rsi {
                window,
                oversold,
                overbought,
            } => {
                if *window == 0 {
                    return Err(StrategyError::invalid(name, "window must be positive"));
                }
                validate_rsi_bounds(name, *oversold, *overbought)
            }
            Self::Vortex { window } => {
                if *window == 0 {
                    return Err(StrategyError::invalid(name, "window must be positive"));
                }
                Ok(())
            }
            Self::MaRsiVolume {
                fast_window,
                slow_window,
                rsi_window,
                oversold,
                overbought,
                volume_multiplier,
            } => {
                validate_windows(name, *fast_window, *slow_window)?;
                if *rsi_window == 0 {
                    return Err(StrategyError::invalid(name, "rsi_window must be positive"));
                }
                validate_rsi_bounds(name, *oversold, *overbought)?;
                if *volume_multiplier <= Decimal::ZERO {
                    return Err(StrategyError::invalid(name, "volume_multiplier must be positive"));
                }
                Ok(())
            }
            Self::UtBot {
                atr_period,
                atr_multiplier,
            } => {
                if *atr_period == 0 {
                    return Err(StrategyError::invalid(name, "atr_period must be positive"));
                }
                if *atr_multiplier <= Decimal::ZERO {
                    return Err(StrategyError::invalid(name, "atr_multiplier must be positive"));
                }
                Ok(())
            }
        }
    }

    /// Evaluate against the current series.
    ///
    /// `None` means inconclusive (including insufficient history).
    pub fn evaluate(&self, series: &PriceSeries) -> Option<Signal> {
        match self {
            Self::MovingAverage {
                fast_window,
                slow_window,
            } => strategies::moving_average::decide(series, *fast_window, *slow_window),
            Self::MovingAverageAnticipation {
                volatility_factor,
                fast_window,
                slow_window,
            } => strategies::moving_average_anticipation::decide(
                series,
                *volatility_factor,
                *fast_window,
                *slow_window,
            ),
            Self::Rsi {
                window,
                oversold,
                overbought,
            } => strategies::rsi::decide(series, *window, *oversold, *overbought),
            Self::Vortex { window } => strategies::vortex::decide(series, *window),
            Self::MaRsiVolume {
                fast_window,
                slow_window,
                rsi_window,
                oversold,
                overbought,
                volume_multiplier,
            } => strategies::ma_rsi_volume::decide(
                series,
                *fast_window,
                *slow_window,
                *rsi_window,
                *oversold,
                *overbought,
                *volume_multiplier,
            ),
            Self::UtBot {
                atr_period,
                atr_multiplier,
            } => strategies::ut_bot::decide(series, *atr_period, *atr_multiplier),
        }
    }
}

fn validate_windows(name: &'static str, fast: usize, slow: usize) -> Result<(), StrategyError> {
    if fast == 0 || slow == 0 {
        return Err(StrategyError::invalid(name, "windows must be positive"));
    }
    if fast >= slow {
        return Err(StrategyError::invalid(
            name,
            format!("fast_window ({}) must be below slow_window ({})", fast, slow),
        ));
    }
    Ok(())
}

fn validate_rsi_bounds(
    name: &'static str,
    oversold: Decimal,
    overbought: Decimal,
) -> Result<(), StrategyError> {
    let hundred = Decimal::ONE_HUNDRED;
    if oversold <= Decimal::ZERO || overbought >= hundred || oversold >= overbought {
        return Err(StrategyError::invalid(
            name,
            format!("rsi bounds must satisfy 0 < oversold ({}) < overbought ({}) < 100", oversold, overbought),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_serde_tagged_form() {
        let json = r#"{"kind": "moving_average", "fast_window": 9, "slow_window": 21}"#;
        let kind: StrategyKind = serde_json::from_str(json).unwrap();
        assert_eq!(
            kind,
            StrategyKind::MovingAverage {
                fast_window: 9,
                slow_window: 21
            }
        );
    }

    #[test]
    fn test_serde_defaults_apply() {
        let json = r#"{"kind": "rsi"}"#;
        let kind: StrategyKind = serde_json::from_str(json).unwrap();
        assert_eq!(
            kind,
            StrategyKind::Rsi {
                window: 14,
                oversold: dec!(30),
                overbought: dec!(70)
            }
        );
    }

    #[test]
    fn test_validate_rejects_inverted_windows() {
        let kind = StrategyKind::MovingAverage {
            fast_window: 40,
            slow_window: 7,
        };
        assert!(kind.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_rsi_bounds() {
        let kind = StrategyKind::Rsi {
            window: 14,
            oversold: dec!(70),
            overbought: dec!(30),
        };
        assert!(kind.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let kinds = [
            StrategyKind::MovingAverage {
                fast_window: 7,
                slow_window: 40,
            },
            StrategyKind::MovingAverageAnticipation {
                volatility_factor: dec!(0.5),
                fast_window: 9,
                slow_window: 21,
            },
            StrategyKind::Rsi {
                window: 14,
                oversold: dec!(30),
                overbought: dec!(70),
            },
            StrategyKind::Vortex { window: 14 },
            StrategyKind::MaRsiVolume {
                fast_window: 9,
                slow_window: 21,
                rsi_window: 14,
                oversold: dec!(30),
                overbought: dec!(70),
                volume_multiplier: dec!(1.5),
            },
            StrategyKind::UtBot {
                atr_period: 10,
                atr_multiplier: dec!(2),
            },
        ];

        for kind in kinds {
            assert!(kind.validate().is_ok(), "{} failed", kind.name());
        }
    }
}
