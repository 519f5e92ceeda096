// Gateway configuration.
//
// Sources, highest priority first
// - Process environment.
// - A `.env` file in the working directory or one of its parents.
// - Built-in defaults.

use std::time::Duration;
use thiserror::Error;

pub const API_URL_KEY: &str = "MEMBERSHIP_API_URL";
pub const API_TOKEN_KEY: &str = "MEMBERSHIP_API_TOKEN";
pub const API_TIMEOUT_KEY: &str = "MEMBERSHIP_API_TIMEOUT_MS";

const DEFAULT_API_URL: &str = "http://localhost:8010";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an http(s) url, got `{value}`")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be a positive number of milliseconds, got `{value}`")]
    InvalidTimeout { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!(path = %path.display(), "loaded .env file"),
            Err(_) => tracing::debug!("no .env file, using environment and defaults"),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(API_URL_KEY).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                key: API_URL_KEY,
                value: base_url,
            });
        }

        let timeout_ms = match lookup(API_TIMEOUT_KEY) {
            None => DEFAULT_TIMEOUT_MS,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        key: API_TIMEOUT_KEY,
                        value,
                    });
                }
            },
        };

        Ok(Self {
            base_url,
            token: lookup(API_TOKEN_KEY).filter(|t| !t.is_empty()),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}
