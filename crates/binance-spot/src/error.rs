//! Exchange error taxonomy: transport errors and exchange API errors.

use serde::Deserialize;
use thiserror::Error;

/// Errors from the exchange client.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Non-success HTTP status with a body that was not a Binance error.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (or transport message).
        message: String,
    },

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// Network-level failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Rate limited by the exchange (HTTP 429/418).
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested wait before the next request.
        retry_after_ms: u64,
    },

    /// Exchange API error body (`{"code": .., "msg": ..}`).
    #[error("exchange error {code}: {message}")]
    Api {
        /// Binance error code.
        code: i32,
        /// Error message from the exchange.
        message: String,
    },

    /// Order rejected for insufficient balance (-2010).
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Order unknown to the exchange (-2011/-2013).
    #[error("order not found")]
    OrderNotFound,

    /// Order parameters violate a symbol filter (-1013/-1111).
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// A required credential variable is missing from the environment.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A required symbol filter was absent from exchangeInfo.
    #[error("missing symbol filter: {0}")]
    MissingFilter(&'static str),
}

impl ExchangeError {
    /// Transient transport failures worth retrying on idempotent requests.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection(_))
    }

    /// Build an error from a non-success response body.
    ///
    /// Binance errors arrive as `{"code": -2010, "msg": "..."}`; anything
    /// else is reported as a plain HTTP error.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ApiBody {
            code: i32,
            msg: String,
        }

        match serde_json::from_str::<ApiBody>(body) {
            Ok(api) => Self::classify(api.code, api.msg),
            Err(_) => Self::Http {
                status,
                message: body.to_string(),
            },
        }
    }

    /// Map well-known Binance error codes onto specific variants.
    fn classify(code: i32, message: String) -> Self {
        match code {
            -2010 => Self::InsufficientBalance,
            -2011 | -2013 => Self::OrderNotFound,
            -1013 | -1111 => Self::InvalidOrder(message),
            _ => Self::Api { code, message },
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}
