use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client configuration loaded from environment variables.
/// Every field has a default, so an empty environment is valid.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix for every endpoint, without a trailing slash.
    pub api_url: String,
    /// Total time allowed for one request, including the response body.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    /// Builds a config for an explicit base URL with default timeouts.
    pub fn new(api_url: impl Into<String>) -> Self {
        Config {
            api_url: normalize_base_url(&api_url.into()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            rust_log: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url =
            std::env::var("RANKER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Config {
            api_url: normalize_base_url(&api_url),
            request_timeout: Duration::from_secs(secs_from_env(
                "RANKER_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            connect_timeout: Duration::from_secs(secs_from_env(
                "RANKER_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn secs_from_env(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
