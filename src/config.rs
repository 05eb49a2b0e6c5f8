//! Client configuration

use crate::types::{Credential, DEFAULT_BASE_URL};
use crate::{NextPayError, Result};
use std::time::Duration;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "NEXTPAY_API_KEY";
/// Environment variable overriding the gateway host
pub const ENV_BASE_URL: &str = "NEXTPAY_BASE_URL";
/// Environment variable enabling request/response logging (`1` or `true`)
pub const ENV_LOGGING: &str = "NEXTPAY_LOGGING";

/// Configuration for [`crate::NextPayClient`]
#[derive(Debug, Clone)]
pub struct NextPayConfig {
    /// API key sent with every token, verify and reject request
    pub api_key: Credential,
    /// Emit request/response events through `tracing`
    pub enable_logging: bool,
    /// Gateway host; endpoint paths are appended to it
    pub base_url: String,
    /// Per-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl NextPayConfig {
    /// Create a config for the production gateway with logging off
    pub fn new(api_key: impl Into<Credential>) -> Self {
        Self {
            api_key: api_key.into(),
            enable_logging: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Read the config from `NEXTPAY_API_KEY`, `NEXTPAY_BASE_URL` and `NEXTPAY_LOGGING`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                NextPayError::config(format!("Missing credentials: {} must be set", ENV_API_KEY))
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|url| !url.is_empty()) {
            config = config.with_base_url(base_url);
        }

        if let Some(logging) = lookup(ENV_LOGGING) {
            config = config.with_logging(matches!(
                logging.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        Ok(config)
    }

    /// Enable or disable request/response logging
    pub fn with_logging(mut self, enable_logging: bool) -> Self {
        self.enable_logging = enable_logging;
        self
    }

    /// Point the client at another host (sandbox, test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(NextPayError::config("API key cannot be empty"));
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| {
            NextPayError::config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(NextPayError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Ok(())
    }
}
