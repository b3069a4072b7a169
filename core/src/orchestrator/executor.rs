//! Orchestrator execution logic

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::config::RunConfig;
use crate::error::{BenchError, BenchResult};
use crate::request::InputSet;
use crate::traits::{CheckClient, RequestEncoder, ResponseDecoder};
use crate::worker::{worker_name, WorkerBuilder, WorkerOutcome};

use super::aggregator::{RunOutcome, Verdict};

/// Orchestrator manages the run lifecycle
///
/// Responsible for spawning workers and collecting their outcomes.
pub struct Orchestrator {
    /// Run configuration
    pub(crate) config: RunConfig,

    /// Records every worker checks
    pub(crate) input: InputSet,

    /// Check client (shared across workers)
    pub(crate) client: Arc<dyn CheckClient>,

    /// Request encoder (shared across workers)
    pub(crate) encoder: Arc<dyn RequestEncoder>,

    /// Response decoder (shared across workers)
    pub(crate) decoder: Arc<dyn ResponseDecoder>,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Use `OrchestratorBuilder` for a validated construction.
    pub fn new(
        config: RunConfig,
        input: InputSet,
        client: Arc<dyn CheckClient>,
        encoder: Arc<dyn RequestEncoder>,
        decoder: Arc<dyn ResponseDecoder>,
    ) -> Self {
        Self {
            config,
            input,
            client,
            encoder,
            decoder,
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Get the input set
    pub fn input(&self) -> &InputSet {
        &self.input
    }

    /// Run the load test
    ///
    /// Builds every worker first, then spawns them and waits for all of
    /// them. A worker that aborts or panics never stops its siblings.
    ///
    /// # Errors
    ///
    /// Returns an error only when a worker cannot be constructed.
    pub async fn run(&self) -> BenchResult<RunOutcome> {
        let input_size = self.input.len();

        tracing::info!(
            workers = self.config.workers,
            chunk_size = self.config.chunk_size,
            input_size,
            planned_checks = self.config.workers * input_size,
            endpoint = self.client.endpoint(),
            "Starting run"
        );

        let mut workers = Vec::with_capacity(self.config.workers);
        for worker_id in 0..self.config.workers {
            let worker = WorkerBuilder::new(worker_id)
                .input(self.input.clone())
                .client(Arc::clone(&self.client))
                .encoder(Arc::clone(&self.encoder))
                .decoder(Arc::clone(&self.decoder))
                .chunk_size(self.config.chunk_size)
                .filter(self.config.filter.clone())
                .retain_request_bodies(self.config.retain_request_bodies)
                .seed(self.config.seed)
                .build()?;
            workers.push(worker);
        }

        let started_at = Utc::now();
        let start = Instant::now();

        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| tokio::spawn(worker.run()))
            .collect();

        // Wait for all workers to complete
        let mut outcomes = Vec::with_capacity(handles.len());
        for (idx, handle) in handles.into_iter().enumerate() {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                    WorkerOutcome::aborted(
                        idx,
                        input_size,
                        BenchError::orchestration(format!("worker task failed: {e}")),
                    )
                }
            };
            log_worker_verdict(&outcome);
            outcomes.push(outcome);
        }

        let outcome = RunOutcome {
            workers: outcomes,
            input_size,
            started_at,
            finished_at: Utc::now(),
            elapsed: start.elapsed(),
        };
        log_run_verdict(&outcome);

        Ok(outcome)
    }
}

fn log_worker_verdict(outcome: &WorkerOutcome) {
    let verdict = Verdict::of(outcome.completed());
    match &outcome.failure {
        None => tracing::info!(
            worker = %worker_name(outcome.worker_id),
            hits = outcome.hits,
            errors = outcome.errors,
            passed = outcome.passed,
            %verdict,
            "Worker finished"
        ),
        Some(failure) => tracing::warn!(
            worker = %worker_name(outcome.worker_id),
            hits = outcome.hits,
            errors = outcome.errors,
            passed = outcome.passed,
            %verdict,
            chunk = failure.chunk_sequence,
            error = %failure.error,
            "Worker finished"
        ),
    }
}

fn log_run_verdict(outcome: &RunOutcome) {
    if outcome.is_success() {
        tracing::info!(verdict = %outcome.verdict(), "Every check could finish");
    } else {
        tracing::warn!(
            verdict = %outcome.verdict(),
            failed_workers = outcome.failed_workers(),
            "Some workers did not finish"
        );
    }

    tracing::info!(
        checked = outcome.sum_checks(),
        planned = outcome.planned_checks(),
        percentage = %format!("{:.2}", outcome.checked_percentage()),
        requests = outcome.total_requests(),
        elapsed_secs = outcome.elapsed.as_secs_f64(),
        throughput = %format!("{:.2}", outcome.checks_per_second()),
        "Run completed"
    );
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("endpoint", &self.client.endpoint())
            .field("encoder", &self.encoder.name())
            .field("decoder", &self.decoder.name())
            .field("input_size", &self.input.len())
            .finish()
    }
}
