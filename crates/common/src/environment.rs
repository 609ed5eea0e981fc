//! Exchange environment selection (production or testnet).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binance environment the bot trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinanceEnvironment {
    /// Production (real funds).
    #[default]
    Production,
    /// Testnet (paper funds).
    Testnet,
}

impl BinanceEnvironment {
    /// REST API base URL for this environment.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.binance.com",
            Self::Testnet => "https://testnet.binance.vision",
        }
    }

    /// Returns true for the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Load from the `BINANCE_ENVIRONMENT` variable, defaulting to production.
    pub fn from_env() -> Self {
        std::env::var("BINANCE_ENVIRONMENT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for BinanceEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "mainnet" => Ok(Self::Production),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing an environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'production' or 'testnet'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(
            BinanceEnvironment::Production.rest_base_url(),
            "https://api.binance.com"
        );
        assert_eq!(
            BinanceEnvironment::Testnet.rest_base_url(),
            "https://testnet.binance.vision"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "prod".parse::<BinanceEnvironment>().unwrap(),
            BinanceEnvironment::Production
        );
        assert_eq!(
            "TESTNET".parse::<BinanceEnvironment>().unwrap(),
            BinanceEnvironment::Testnet
        );
        assert!("staging".parse::<BinanceEnvironment>().is_err());
    }

    #[test]
    fn test_default_is_production() {
        assert!(BinanceEnvironment::default().is_production());
    }
}
