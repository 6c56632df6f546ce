//! Client configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file by
//! the binary) and fall back to local-development defaults.

use std::time::Duration;

use thiserror::Error;

/// Default API origin used when `CAMPMARKET_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default keychain service name for persisted credentials.
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "com.campmarket.client";

/// Default connect and read timeout (30 seconds each).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default bound on a whole request, including writing the body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings shared by the HTTP transport and the credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API origin, without trailing slash.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    /// Total time allowed per request. Bounds stalled uploads, which the
    /// connect and read timeouts do not cover.
    pub request_timeout: Duration,
    /// Keychain service the credential pair is stored under.
    pub keychain_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config from `CAMPMARKET_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed timeouts are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CAMPMARKET_API_URL") {
            config = config.with_base_url(&url);
        }
        if let Some(secs) = lookup("CAMPMARKET_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout = parse_secs("CAMPMARKET_CONNECT_TIMEOUT_SECS", secs)?;
        }
        if let Some(secs) = lookup("CAMPMARKET_READ_TIMEOUT_SECS") {
            config.read_timeout = parse_secs("CAMPMARKET_READ_TIMEOUT_SECS", secs)?;
        }
        if let Some(secs) = lookup("CAMPMARKET_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("CAMPMARKET_REQUEST_TIMEOUT_SECS", secs)?;
        }
        if let Some(service) = lookup("CAMPMARKET_KEYCHAIN_SERVICE") {
            config.keychain_service = service;
        }

        Ok(config)
    }

    /// Replace the base URL, trimming any trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

fn parse_secs(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue { var, value }),
    }
}
