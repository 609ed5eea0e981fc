//! Configuration loading.
//!
//! `trader.toml` (or the file named by `BOT_CONFIG`) is layered with
//! `BOT_`-prefixed environment overrides and mapped onto per-asset
//! `AssetConfig`s.

use common::BinanceEnvironment;
use config::{Config, ConfigError, Environment, File};
use model::CandleInterval;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use strategy::{StrategyKind, StrategyVoter};
use trader::{AssetConfig, TakeProfitTier, TraderError};

fn default_acceptable_loss_pct() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}

fn default_stop_loss_pct() -> Decimal {
    Decimal::new(35, 1) // 3.5%
}

fn default_poll_interval_secs() -> u64 {
    30 * 60
}

fn default_post_order_delay_secs() -> u64 {
    60 * 60
}

fn default_true() -> bool {
    true
}

/// Top-level bot settings.
#[derive(Debug, Deserialize)]
pub struct BotSettings {
    /// Serialize cycles across assets behind one global lock.
    #[serde(default)]
    pub serialize_cycles: bool,
    /// Exchange environment (production or testnet).
    #[serde(default)]
    pub environment: BinanceEnvironment,
    /// Assets to trade, one polling loop each.
    pub assets: Vec<AssetSettings>,
}

/// One asset block of the configuration file.
#[derive(Debug, Deserialize)]
pub struct AssetSettings {
    /// Base asset code (e.g. "ADA").
    pub asset: String,
    /// Trading pair symbol (e.g. "ADAUSDT").
    pub symbol: String,
    /// Candle interval (e.g. "15m").
    pub interval: CandleInterval,
    /// Base quantity for opening orders.
    pub traded_quantity: Decimal,
    #[serde(default = "default_acceptable_loss_pct")]
    pub acceptable_loss_pct: Decimal,
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: Decimal,
    /// Take-profit triggers, in percent gain (parallel to the amounts).
    #[serde(default)]
    pub take_profit_at_pct: Vec<Decimal>,
    /// Share of the balance sold at each trigger, in percent.
    #[serde(default)]
    pub take_profit_amount_pct: Vec<Decimal>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_post_order_delay_secs")]
    pub post_order_delay_secs: u64,
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
    /// Primary strategy (tagged by `kind`).
    pub main_strategy: StrategyKind,
    /// Optional fallback strategy consulted when the primary abstains.
    #[serde(default)]
    pub fallback_strategy: Option<StrategyKind>,
}

impl AssetSettings {
    /// Map onto the engine's configuration, zipping the take-profit arrays.
    pub fn into_config(self) -> Result<AssetConfig, TraderError> {
        if self.take_profit_at_pct.len() != self.take_profit_amount_pct.len() {
            return Err(TraderError::Config(format!(
                "{}: take_profit_at_pct and take_profit_amount_pct must have the same length",
                self.symbol
            )));
        }

        let take_profit_tiers = self
            .take_profit_at_pct
            .iter()
            .zip(&self.take_profit_amount_pct)
            .map(|(trigger, amount)| TakeProfitTier::new(*trigger, *amount))
            .collect();

        Ok(AssetConfig {
            asset: self.asset,
            symbol: self.symbol,
            interval: self.interval,
            traded_quantity: self.traded_quantity,
            acceptable_loss_pct: self.acceptable_loss_pct,
            stop_loss_pct: self.stop_loss_pct,
            take_profit_tiers,
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            post_order_delay: Duration::from_secs(self.post_order_delay_secs),
            voter: StrategyVoter::new(
                self.main_strategy,
                self.fallback_strategy,
                self.fallback_enabled,
            ),
        })
    }
}

/// Load settings from `trader.toml` (override the file with `BOT_CONFIG`)
/// plus `BOT_*` environment variables.
pub fn load() -> Result<BotSettings, ConfigError> {
    let path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| "trader".to_string());

    Config::builder()
        .add_source(File::with_name(&path))
        .add_source(Environment::with_prefix("BOT").separator("__"))
        .build()?
        .try_deserialize()
}
