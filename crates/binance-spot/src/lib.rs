//! Binance spot REST client.
//!
//! Authenticated, clock-synchronized access to the endpoints the trading
//! core consumes:
//!
//! - **Market data**: klines, symbol precision filters
//! - **Account**: balances, open orders, order history
//! - **Trading**: order placement and cancellation with HMAC-SHA256 signing
//!
//! Transient transport failures on idempotent GETs are retried a bounded
//! number of times with jittered backoff; order placement is never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_spot::{ApiCredentials, BinanceSpotClient};
//! use common::BinanceEnvironment;
//! use model::CandleInterval;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = BinanceSpotClient::new(credentials, BinanceEnvironment::Testnet)?;
//!
//! client.sync_time().await?;
//! let candles = client.klines("BTCUSDT", CandleInterval::FifteenMinutes, 500).await?;
//! ```

mod client;
mod credentials;
mod error;
mod http;
mod responses;
mod signer;

pub use client::BinanceSpotClient;
pub use credentials::ApiCredentials;
pub use error::ExchangeError;
pub use responses::{
    AccountInfo, AssetBalance, OpenOrder, OrderFill, OrderReceipt, OrderRecord, SymbolFilters,
};
