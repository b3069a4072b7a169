//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::request::{CheckFilter, InputSet};
use crate::traits::{CheckClient, RequestEncoder, ResponseDecoder};

use super::executor::Worker;

use std::sync::Arc;

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .input(input)
///     .client(client)
///     .encoder(encoder)
///     .decoder(decoder)
///     .chunk_size(10)
///     .seed(Some(42))
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    input: Option<InputSet>,
    client: Option<Arc<dyn CheckClient>>,
    encoder: Option<Arc<dyn RequestEncoder>>,
    decoder: Option<Arc<dyn ResponseDecoder>>,
    chunk_size: Option<usize>,
    filter: CheckFilter,
    retain_request_bodies: bool,
    seed: Option<u64>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            input: None,
            client: None,
            encoder: None,
            decoder: None,
            chunk_size: None,
            filter: CheckFilter::default(),
            retain_request_bodies: false,
            seed: None,
        }
    }

    /// Set the shared input set
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

    /// Set the number of records per request
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Set the filter parameters sent with every chunk
    pub fn filter(mut self, filter: CheckFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keep request bodies in the run log
    pub fn retain_request_bodies(mut self, retain: bool) -> Self {
        self.retain_request_bodies = retain;
        self
    }

    /// Set the base shuffle seed
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing or the chunk
    /// size is zero.
    pub fn build(self) -> BenchResult<Worker> {
        let input = self.input.ok_or(BenchError::missing_config("input"))?;
        let client = self.client.ok_or(BenchError::missing_config("client"))?;
        let encoder = self.encoder.ok_or(BenchError::missing_config("encoder"))?;
        let decoder = self.decoder.ok_or(BenchError::missing_config("decoder"))?;
        let chunk_size = self
            .chunk_size
            .ok_or(BenchError::missing_config("chunk_size"))?;

        if chunk_size == 0 {
            return Err(BenchError::config("chunk_size must be at least 1"));
        }

        Ok(Worker::new(
            self.id,
            input,
            client,
            encoder,
            decoder,
            chunk_size,
            self.filter,
            self.retain_request_bodies,
            self.seed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_missing_input() {
        let result = WorkerBuilder::new(0).chunk_size(10).build();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.message.contains("input"));
    }

    #[test]
    fn test_builder_missing_client() {
        let result = WorkerBuilder::new(0)
            .input(InputSet::from_sources(["CCO"]))
            .chunk_size(10)
            .build();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.message.contains("client"));
    }
}
