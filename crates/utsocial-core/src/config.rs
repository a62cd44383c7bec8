//! Application configuration model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base path of the authentication endpoints.
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:8000/api/users";

/// Simulated fetch delay of the synthetic feed, in milliseconds.
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 1000;

/// Root of `config.toml`. Every section and field has a default, so an
/// empty or missing file is a valid configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthConfig,
    pub feed: FeedConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// `/login` and `/register` are appended to this.
    pub base_url: String,
    /// No timeout is applied unless set; the transport decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl AuthConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FeedConfig {
    pub mock_latency_ms: u64,
}

impl FeedConfig {
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auth.base_url, DEFAULT_AUTH_BASE_URL);
        assert!(config.auth.request_timeout().is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [auth]
            request_timeout_secs = 5

            [feed]
            mock_latency_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.base_url, DEFAULT_AUTH_BASE_URL);
        assert_eq!(config.auth.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.feed.mock_latency(), Duration::ZERO);
    }
}
