//! Worker outcome tracking

use crate::error::BenchError;
use crate::metrics::RunLogEntry;

use std::time::{Duration, Instant};

/// Terminal error of an aborted worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFailure {
    /// Sequence number of the chunk that failed
    pub chunk_sequence: usize,

    /// What went wrong
    pub error: BenchError,
}

/// Counters and run log produced by one worker
///
/// Owned by the worker while it runs and handed back to the orchestrator
/// through the task's join handle.
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    /// Worker identifier
    pub worker_id: usize,

    /// Number of records the worker was asked to check
    pub input_size: usize,

    /// Records classified as passed
    pub passed: usize,

    /// Records the service failed to check
    pub errors: usize,

    /// Records with at least one legislation match
    pub hits: usize,

    /// Total matches across all hit records
    pub hit_size: usize,

    /// One entry per successful chunk, in send order
    pub logs: Vec<RunLogEntry>,

    /// Set when the worker stopped before checking every record
    pub failure: Option<WorkerFailure>,

    /// Worker start time
    pub started_at: Option<Instant>,

    /// Worker end time
    pub ended_at: Option<Instant>,
}

impl WorkerOutcome {
    /// Create an empty outcome
    pub fn new(worker_id: usize, input_size: usize) -> Self {
        Self {
            worker_id,
            input_size,
            passed: 0,
            errors: 0,
            hits: 0,
            hit_size: 0,
            logs: Vec::new(),
            failure: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Outcome of a worker that never reported back
    pub fn aborted(worker_id: usize, input_size: usize, error: BenchError) -> Self {
        let mut outcome = Self::new(worker_id, input_size);
        outcome.failure = Some(WorkerFailure {
            chunk_sequence: 0,
            error,
        });
        outcome
    }

    /// Start tracking (records start time)
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop tracking (records end time)
    pub fn stop(&mut self) {
        self.ended_at = Some(Instant::now());
    }

    /// Add a finished chunk
    pub fn record(&mut self, entry: RunLogEntry) {
        let classification = &entry.classification;
        self.passed += classification.passed;
        self.errors += classification.error;
        self.hits += classification.hit_count();
        self.hit_size += classification.hit_size();
        self.logs.push(entry);
    }

    /// Mark the worker as aborted at the given chunk
    pub fn fail(&mut self, chunk_sequence: usize, error: BenchError) {
        self.failure = Some(WorkerFailure {
            chunk_sequence,
            error,
        });
    }

    /// Number of records checked so far
    pub fn checks(&self) -> usize {
        self.passed + self.errors + self.hits
    }

    /// Whether every record of the input set was checked
    pub fn completed(&self) -> bool {
        self.checks() == self.input_size
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| {
            self.ended_at
                .map(|end| end.duration_since(start))
                .unwrap_or_else(|| start.elapsed())
        })
    }

    /// Get checked records per second
    pub fn checks_per_second(&self) -> f64 {
        self.elapsed()
            .map(|d| {
                let secs = d.as_secs_f64();
                if secs > 0.0 {
                    self.checks() as f64 / secs
                } else {
                    0.0
                }
            })
            .unwrap_or(0.0)
    }
}
