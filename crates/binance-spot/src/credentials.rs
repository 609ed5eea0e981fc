//! API credential handling.
//!
//! The secret key lives in a `SecretString` so it cannot leak through Debug
//! output and is zeroed on drop.

use crate::error::ExchangeError;
use secrecy::{ExposeSecret, SecretString};

/// API key pair for signed requests.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    /// Load credentials from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`.
    ///
    /// A `.env` file is honoured when present.
    pub fn from_env() -> Result<Self, ExchangeError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| ExchangeError::MissingEnvVar("BINANCE_API_KEY".into()))?;
        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| ExchangeError::MissingEnvVar("BINANCE_SECRET_KEY".into()))?;

        Ok(Self::new(api_key, secret_key))
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        }
    }

    /// The API key (public, sent as a header).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The secret key, for signing only. Never log the return value.
    pub fn secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
