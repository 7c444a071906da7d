//! Retrying HTTP fetch
//!
//! `GET` a URL and return the body bytes. Transport errors and `5xx`
//! responses are retried with exponential backoff
//! (`base_backoff * 2^attempt`); any other non-200 status fails at once.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use types::errors::FetchError;

/// Source of raw payload bytes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Retry and timeout settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Total attempts per fetch, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on every further retry.
    pub base_backoff: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FetchConfig {
    /// Delay after the failed attempt with zero-based index `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_backoff.saturating_mul(factor)
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// [`Fetcher`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let attempts = self.config.attempts();
        let mut last_error = String::new();

        for attempt in 0..attempts {
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_server_error() => {
                    warn!(
                        url,
                        attempt = attempt + 1,
                        status = response.status().as_u16(),
                        "Fetch attempt failed with server error"
                    );
                    last_error = format!("status {}", response.status().as_u16());
                }
                Ok(response) => {
                    let status = response.status();
                    if status != StatusCode::OK {
                        return Err(FetchError::UnexpectedStatus {
                            url: url.to_string(),
                            status: status.as_u16(),
                        });
                    }
                    let body = response.bytes().await.map_err(|e| FetchError::Body {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })?;
                    debug!(url, bytes = body.len(), attempt = attempt + 1, "Fetched payload");
                    return Ok(body.to_vec());
                }
                Err(e) if e.is_builder() => {
                    return Err(FetchError::InvalidRequest {
                        url: url.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(url, attempt = attempt + 1, error = %e, "Fetch attempt failed");
                    last_error = e.to_string();
                }
            }

            if attempt + 1 < attempts {
                let delay = self.config.backoff(attempt);
                debug!(url, delay_ms = delay.as_millis() as u64, "Waiting before retry");
                tokio::time::sleep(delay).await;
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts,
            last_error,
        })
    }
}
