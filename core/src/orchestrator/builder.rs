//! Builder pattern for Orchestrator construction

use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{BenchError, BenchResult};
use crate::request::InputSet;
use crate::traits::{CheckClient, RequestEncoder, ResponseDecoder};

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with proper configuration
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .config(RunConfig::new(4, 10))
///     .input(input)
///     .client(client)
///     .encoder(encoder)
///     .decoder(decoder)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    config: RunConfig,
    input: Option<InputSet>,
    client: Option<Arc<dyn CheckClient>>,
    encoder: Option<Arc<dyn RequestEncoder>>,
    decoder: Option<Arc<dyn ResponseDecoder>>,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
            input: None,
            client: None,
            encoder: None,
            decoder: None,
        }
    }

    /// Set the full run configuration
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of workers
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the number of records per request
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Set the input set shared by all workers
    pub fn input(mut self, input: InputSet) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the check client
    pub fn client(mut self, client: Arc<dyn CheckClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the request encoder
    pub fn encoder(mut self, encoder: Arc<dyn RequestEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Set the response decoder
    pub fn decoder(mut self, decoder: Arc<dyn ResponseDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator is not set, the input set is
    /// empty, or configuration validation fails.
    pub fn build(self) -> BenchResult<Orchestrator> {
        let input = self
            .input
            .ok_or_else(|| BenchError::missing_config("input"))?;

        let client = self
            .client
            .ok_or_else(|| BenchError::missing_config("client"))?;

        let encoder = self
            .encoder
            .ok_or_else(|| BenchError::missing_config("encoder"))?;

        let decoder = self
            .decoder
            .ok_or_else(|| BenchError::missing_config("decoder"))?;

        self.config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        if input.is_empty() {
            return Err(BenchError::config("input set is empty"));
        }

        Ok(Orchestrator::new(self.config, input, client, encoder, decoder))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
