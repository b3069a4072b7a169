//! Run outcome aggregated from every worker

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::worker::WorkerOutcome;

/// Whether a worker (or the whole run) checked everything it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Every record was checked
    Passed,
    /// At least one record was left unchecked
    Failed,
}

impl Verdict {
    /// Verdict for a completion flag
    pub fn of(completed: bool) -> Self {
        if completed {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Passed => f.write_str("PASSED"),
            Verdict::Failed => f.write_str("FAILED"),
        }
    }
}

/// Result of a whole run: one outcome per worker, in worker id order
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Worker outcomes, indexed by worker id
    pub workers: Vec<WorkerOutcome>,

    /// Size of the input set every worker checked
    pub input_size: usize,

    /// Wall-clock time the first worker was spawned
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the last worker was joined
    pub finished_at: DateTime<Utc>,

    /// Total run time
    pub elapsed: Duration,
}

impl RunOutcome {
    /// Number of checks a fully successful run performs
    pub fn planned_checks(&self) -> usize {
        self.workers.len() * self.input_size
    }

    /// Number of checks actually performed
    pub fn sum_checks(&self) -> usize {
        self.workers.iter().map(WorkerOutcome::checks).sum()
    }

    /// Number of workers that did not complete
    pub fn failed_workers(&self) -> usize {
        self.workers.iter().filter(|w| !w.completed()).count()
    }

    /// Whether every worker completed
    pub fn is_success(&self) -> bool {
        self.workers.iter().all(WorkerOutcome::completed)
    }

    /// Verdict of the whole run
    pub fn verdict(&self) -> Verdict {
        Verdict::of(self.is_success())
    }

    /// Process exit status for this run
    pub fn exit_code(&self, fail_on_error: bool) -> i32 {
        if fail_on_error && !self.is_success() {
            1
        } else {
            0
        }
    }

    /// Performed checks as a percentage of planned checks
    pub fn checked_percentage(&self) -> f64 {
        let planned = self.planned_checks();
        if planned == 0 {
            0.0
        } else {
            self.sum_checks() as f64 * 100.0 / planned as f64
        }
    }

    /// Overall checked records per second
    pub fn checks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.sum_checks() as f64 / secs
        } else {
            0.0
        }
    }

    /// Total number of requests sent by all workers
    pub fn total_requests(&self) -> usize {
        self.workers.iter().map(|w| w.logs.len()).sum()
    }
}
