//! Upstox adapter configuration.

use std::time::Duration;

/// Default base URL for the Upstox v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.upstox.com";

/// Configuration for the Upstox broker adapter.
#[derive(Debug, Clone)]
pub struct UpstoxConfig {
    /// OAuth access token for the trading session.
    pub access_token: String,
    /// API base URL. Overridable for tests.
    pub base_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl UpstoxConfig {
    /// Create a new configuration with default URL and timeout.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = UpstoxConfig::new("token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_overrides() {
        let config = UpstoxConfig::new("token")
            .with_base_url("http://localhost:9999")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
