//! Thin reqwest wrapper with typed errors and bounded GET retries.

use crate::error::ExchangeError;
use common::Backoff;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout for all calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Attempts for idempotent GETs hitting transient transport errors.
const MAX_GET_ATTEMPTS: u32 = 3;
/// Backoff bounds between GET retries.
const RETRY_BASE: Duration = Duration::from_millis(500);
const RETRY_CAP: Duration = Duration::from_secs(5);

/// HTTP client bound to one base URL.
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExchangeError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with bounded retries on transient transport failures.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<T, ExchangeError> {
        let mut backoff = Backoff::new(RETRY_BASE, RETRY_CAP);

        for attempt in 1..=MAX_GET_ATTEMPTS {
            match self.request(Method::GET, path, query, api_key).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < MAX_GET_ATTEMPTS => {
                    let delay = backoff.next_delay();
                    warn!(
                        path = %path,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient GET failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        unreachable!("retry loop returns on the last attempt")
    }

    /// POST. Never retried: the request may have reached the exchange.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<T, ExchangeError> {
        self.request(Method::POST, path, query, api_key).await
    }

    /// DELETE. Never retried.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<T, ExchangeError> {
        self.request(Method::DELETE, path, query, api_key).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<T, ExchangeError> {
        let url = self.build_url(path, query);
        debug!(method = %method, url = %url, "request");

        let mut request = self.client.request(method, &url);
        if let Some(key) = api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ExchangeError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                warn!(body = %body, error = %e, "failed to parse response body");
                ExchangeError::Parse(e.to_string())
            });
        }

        // 429 (rate limit) and 418 (auto-ban) carry a Retry-After semantic.
        if status.as_u16() == 429 || status.as_u16() == 418 {
            return Err(ExchangeError::RateLimited {
                retry_after_ms: 60_000,
            });
        }

        Err(ExchangeError::from_response(status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_variants() {
        let client = HttpClient::new("https://api.example.com/").unwrap();

        assert_eq!(
            client.build_url("/api/v3/time", None),
            "https://api.example.com/api/v3/time"
        );
        assert_eq!(
            client.build_url("/api/v3/klines", Some("symbol=BTCUSDT&limit=5")),
            "https://api.example.com/api/v3/klines?symbol=BTCUSDT&limit=5"
        );
        assert_eq!(
            client.build_url("/api/v3/time", Some("")),
            "https://api.example.com/api/v3/time"
        );
    }
}
