//! Environment configuration

use std::time::Duration;

use pipeline::{FetchConfig, SourceUrls};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ADS_URL: &str = "http://mock-ads:3001";
pub const DEFAULT_CRM_URL: &str = "http://mock-crm:3002";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

/// Runtime settings for the API binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub sources: SourceUrls,
    pub fetch: FetchConfig,
    /// `EnvFilter` directive, e.g. `info` or `pipeline=debug`.
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    /// Upstream URL variables that were unset and fell back to defaults.
    pub defaulted: Vec<&'static str>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            sources: SourceUrls {
                ads: DEFAULT_ADS_URL.to_string(),
                crm: DEFAULT_CRM_URL.to_string(),
            },
            fetch: FetchConfig::default(),
            log_level: None,
            log_format: LogFormat::Json,
            defaulted: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty or malformed values fall back to their defaults. Nothing is
    /// logged here; see [`ApiConfig::log_defaults`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();
        let mut defaulted = Vec::new();

        let ads = get("ADS_API_URL").unwrap_or_else(|| {
            defaulted.push("ADS_API_URL");
            defaults.sources.ads.clone()
        });
        let crm = get("CRM_API_URL").unwrap_or_else(|| {
            defaulted.push("CRM_API_URL");
            defaults.sources.crm.clone()
        });

        let fetch = FetchConfig {
            max_attempts: parse_or(get("MAX_RETRIES"), defaults.fetch.max_attempts),
            base_backoff: Duration::from_millis(parse_or(
                get("RETRY_BACKOFF_MS"),
                defaults.fetch.base_backoff.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(parse_or(
                get("HTTP_TIMEOUT_SECS"),
                defaults.fetch.request_timeout.as_secs(),
            )),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            Some("text") | Some("pretty") => LogFormat::Text,
            _ => LogFormat::Json,
        };

        Self {
            port: parse_or(get("PORT"), defaults.port),
            sources: SourceUrls { ads, crm },
            fetch,
            log_level: get("LOG_LEVEL"),
            log_format,
            defaulted,
        }
    }

    /// Warn once per upstream URL that fell back to its default.
    pub fn log_defaults(&self) {
        for &key in &self.defaulted {
            let default = match key {
                "ADS_API_URL" => self.sources.ads.as_str(),
                _ => self.sources.crm.as_str(),
            };
            warn!(default, "{key} is empty, using default");
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
