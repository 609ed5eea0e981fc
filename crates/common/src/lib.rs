//! Shared utilities for the trading bot workspace.
//!
//! - **Logging**: one-shot `tracing` subscriber initialisation
//! - **Environment**: production/testnet endpoint selection
//! - **Backoff**: jittered exponential backoff for transient request failures

mod backoff;
mod environment;
mod logging;

pub use backoff::Backoff;
pub use environment::{BinanceEnvironment, ParseEnvironmentError};
pub use logging::init_logging;
