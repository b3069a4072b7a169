//! Run configuration types

use crate::request::CheckFilter;
use serde::{Deserialize, Serialize};

/// Run configuration
///
/// Defines how a load run is executed: how many workers, how many records
/// per request, which filter parameters are sent, and what is kept for
/// the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of concurrent workers, each checking the full input set
    pub workers: usize,

    /// Number of records sent in one request
    pub chunk_size: usize,

    /// Fixed filter parameters sent with every chunk
    #[serde(default)]
    pub filter: CheckFilter,

    /// Keep each request body in the run log
    #[serde(default)]
    pub retain_request_bodies: bool,

    /// Exit non-zero when any worker did not complete
    #[serde(default)]
    pub fail_on_error: bool,

    /// Base seed for the per-worker shuffles; entropy-seeded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            chunk_size: 1,
            filter: CheckFilter::default(),
            retain_request_bodies: false,
            fail_on_error: false,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Create a new config with the given worker count and chunk size
    pub fn new(workers: usize, chunk_size: usize) -> Self {
        Self {
            workers,
            chunk_size,
            ..Default::default()
        }
    }

    /// Set the filter parameters
    pub fn with_filter(mut self, filter: CheckFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keep request bodies in the run log
    pub fn with_retained_request_bodies(mut self, retain: bool) -> Self {
        self.retain_request_bodies = retain;
        self
    }

    /// Fail the process when the run is not successful
    pub fn with_fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    /// Make the per-worker shuffles reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers(
                "worker count must be at least 1".into(),
            ));
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(
                "chunk size must be at least 1".into(),
            ));
        }

        if let Some(categories) = &self.filter.categories {
            if categories.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigError::InvalidFilter(
                    "category names must not be blank".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count: {0}")]
    InvalidWorkers(String),

    /// Invalid chunk size
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(String),

    /// Invalid filter parameters
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.workers, 1);
        assert_eq!(config.chunk_size, 1);
        assert!(!config.retain_request_bodies);
        assert!(!config.fail_on_error);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = RunConfig::new(4, 10)
            .with_filter(CheckFilter::none().with_date("2017-01-01"))
            .with_retained_request_bodies(true)
            .with_fail_on_error(true)
            .with_seed(42);

        assert_eq!(config.workers, 4);
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.filter.date.as_deref(), Some("2017-01-01"));
        assert!(config.retain_request_bodies);
        assert!(config.fail_on_error);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(RunConfig::new(4, 10).validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_workers() {
        let err = RunConfig::new(0, 10).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkers(_)));
    }

    #[test]
    fn test_config_validation_zero_chunk_size() {
        let err = RunConfig::new(1, 0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChunkSize(_)));
    }

    #[test]
    fn test_config_validation_blank_category() {
        let config =
            RunConfig::new(1, 1).with_filter(CheckFilter::none().with_categories(["Narcotics", " "]));
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidFilter(_)
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = RunConfig::new(5, 20).with_seed(7);

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.workers, 5);
        assert_eq!(deserialized.chunk_size, 20);
        assert_eq!(deserialized.seed, Some(7));
    }
}
