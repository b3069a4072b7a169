//! Check client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path of the list check operation, relative to the base URL
pub const CHECK_LIST_PATH: &str = "/check/list";

/// Configuration validation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required configuration field is missing.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A timeout value is out of acceptable range.
    #[error("invalid timeout: {0:?}")]
    InvalidTimeout(Duration),
}

/// Configuration for creating a check client.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL, without the check path
    pub base_url: String,

    /// Basic auth user
    #[serde(default = "default_user")]
    pub user: String,

    /// Basic auth password
    #[serde(default = "default_password")]
    pub password: String,

    /// Request timeout
    #[serde(default = "default_timeout")]
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "adminPass".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

impl ClientConfig {
    /// Create a new client config with default credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user: default_user(),
            password: default_password(),
            timeout: default_timeout(),
        }
    }

    /// Set the basic auth credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the list check operation.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHECK_LIST_PATH)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigValidationError::MissingField("base_url"));
        }

        if self.user.is_empty() {
            return Err(ConfigValidationError::MissingField("user"));
        }

        // 1s to 1h
        if self.timeout < Duration::from_secs(1) || self.timeout > Duration::from_secs(3600) {
            return Err(ConfigValidationError::InvalidTimeout(self.timeout));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:8080/cc");
        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "adminPass");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_path() {
        assert_eq!(
            ClientConfig::new("http://host/cc/").endpoint(),
            "http://host/cc/check/list"
        );
        assert_eq!(
            ClientConfig::new("http://host/cc").endpoint(),
            "http://host/cc/check/list"
        );
    }

    #[test]
    fn test_validation_missing_fields() {
        assert_eq!(
            ClientConfig::new("").validate(),
            Err(ConfigValidationError::MissingField("base_url"))
        );
        assert_eq!(
            ClientConfig::new("http://host")
                .with_credentials("", "x")
                .validate(),
            Err(ConfigValidationError::MissingField("user"))
        );
    }

    #[test]
    fn test_validation_timeout_range() {
        let config = ClientConfig::new("http://host").with_timeout(Duration::from_millis(10));
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ClientConfig::new("http://host").with_credentials("bench", "s3cret");
        let debug = format!("{config:?}");
        assert!(debug.contains("bench"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "http://host", "timeout": "30s"}"#).unwrap();
        assert_eq!(config.user, "admin");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
