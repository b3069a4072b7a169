//! Worker execution loop

use crate::error::{BenchError, BenchResult};
use crate::metrics::RunLogEntry;
use crate::request::{CheckFilter, InputRecord, InputSet};
use crate::response::ClassificationResult;
use crate::traits::{CheckClient, RequestEncoder, ResponseDecoder};

use super::stats::WorkerOutcome;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

/// Worker checks the whole input set in its own random order, one chunk
/// per request: encode -> send -> decode -> classify -> log -> repeat
///
/// Workers are tokio tasks managed by the Orchestrator. They share the
/// input set, client and codec via Arc and hand their outcome back when
/// the task finishes.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Records to check (shared across workers)
    input: InputSet,

    /// Check client (shared across workers via Arc)
    client: Arc<dyn CheckClient>,

    /// Request encoder
    encoder: Arc<dyn RequestEncoder>,

    /// Response decoder
    decoder: Arc<dyn ResponseDecoder>,

    /// Records per request
    chunk_size: usize,

    /// Fixed filter parameters sent with every chunk
    filter: CheckFilter,

    /// Keep request bodies in the run log
    retain_request_bodies: bool,

    /// Positions into `input`, in send order
    permutation: Vec<usize>,
}

impl Worker {
    /// Create a new worker and draw its visiting order
    ///
    /// With a seed, worker `id` shuffles with `seed + id`; without one the
    /// shuffle is seeded from OS entropy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: usize,
        input: InputSet,
        client: Arc<dyn CheckClient>,
        encoder: Arc<dyn RequestEncoder>,
        decoder: Arc<dyn ResponseDecoder>,
        chunk_size: usize,
        filter: CheckFilter,
        retain_request_bodies: bool,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(id as u64)),
            None => StdRng::from_entropy(),
        };
        let mut permutation: Vec<usize> = (0..input.len()).collect();
        permutation.shuffle(&mut rng);

        Self {
            id,
            input,
            client,
            encoder,
            decoder,
            chunk_size,
            filter,
            retain_request_bodies,
            permutation,
        }
    }

    /// Run the worker loop
    ///
    /// Stops at the first failing chunk; the returned outcome then carries
    /// the counters of every chunk before it plus the failure.
    pub async fn run(self) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::new(self.id, self.input.len());
        outcome.start();

        tracing::debug!(
            worker_id = self.id,
            input_size = self.input.len(),
            chunk_size = self.chunk_size,
            chunks = self.chunk_count(),
            endpoint = self.client.endpoint(),
            "Worker started"
        );

        for (sequence, positions) in self.permutation.chunks(self.chunk_size).enumerate() {
            match self.execute_chunk(sequence, positions).await {
                Ok(entry) => {
                    tracing::debug!(
                        worker_id = self.id,
                        sequence,
                        chunk_size = entry.chunk_size,
                        duration_ms = entry.duration_ms,
                        "Chunk checked"
                    );
                    outcome.record(entry);
                }
                Err(e) => {
                    tracing::error!(
                        worker_id = self.id,
                        sequence,
                        kind = %e.kind,
                        error = %e.message,
                        "Chunk failed, worker stopping"
                    );
                    outcome.fail(sequence, e);
                    break;
                }
            }
        }

        outcome.stop();
        tracing::debug!(
            worker_id = self.id,
            passed = outcome.passed,
            errors = outcome.errors,
            hits = outcome.hits,
            completed = outcome.completed(),
            elapsed_ms = ?outcome.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        outcome
    }

    /// Send one chunk and classify the answer
    async fn execute_chunk(&self, sequence: usize, positions: &[usize]) -> BenchResult<RunLogEntry> {
        // 1. Encode the chunk with the fixed filter
        let records: Vec<&InputRecord> = positions.iter().map(|&pos| &self.input[pos]).collect();
        let body = self.encoder.encode(&records, &self.filter)?;

        // 2. Send and measure
        let started_at = Utc::now();
        let start = Instant::now();
        let response = self.client.send(&body).await?;
        if !response.is_success() {
            return Err(BenchError::service(format!(
                "{} answered with status {}",
                self.client.endpoint(),
                response.status
            )));
        }

        // 3. Decode; every submitted record needs its own match list
        let decoded = self.decoder.decode(&response.body)?;
        if decoded.len() != records.len() {
            return Err(BenchError::decode(format!(
                "expected {} match lists, got {}",
                records.len(),
                decoded.len()
            )));
        }

        // 4. Classify
        let classification = ClassificationResult::from_response(&decoded);
        let duration = start.elapsed();
        let ended_at = Utc::now();

        Ok(RunLogEntry {
            worker_id: self.id,
            sequence,
            started_at,
            ended_at,
            duration_ms: duration.as_millis() as u64,
            chunk_size: records.len(),
            request_body: self.retain_request_bodies.then_some(body),
            classification,
        })
    }

    /// Positions into the input set, in the order they will be sent
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Number of requests a full run sends
    pub fn chunk_count(&self) -> usize {
        self.permutation.len().div_ceil(self.chunk_size)
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("endpoint", &self.client.endpoint())
            .field("encoder", &self.encoder.name())
            .field("decoder", &self.decoder.name())
            .field("input_size", &self.input.len())
            .field("chunk_size", &self.chunk_size)
            .field("filter", &self.filter)
            .finish()
    }
}
