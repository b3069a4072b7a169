//! Report data model assembled from a finished run
//!
//! Sinks in the report crate only read [`ReportData`]; nothing here
//! renders anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult, ErrorKind};
use crate::metrics::{distribution, durations_ms, DistributionBucket, DurationStats, RunLogEntry};
use crate::orchestrator::{RunOutcome, Verdict};
use crate::worker::{worker_name, WorkerOutcome};

/// Run-wide counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Global verdict
    pub verdict: Verdict,
    /// Whether every worker checked every record
    pub success: bool,
    /// Number of workers
    pub worker_count: usize,
    /// Workers that did not finish
    pub failed_workers: usize,
    /// Records in the input set
    pub input_size: usize,
    /// workers × input size
    pub planned_checks: usize,
    /// Checks actually performed
    pub executed_checks: usize,
    /// executed / planned, in percent
    pub checked_percentage: f64,
    /// Requests sent by all workers
    pub total_requests: usize,
    /// Total run time in seconds
    pub elapsed_secs: f64,
    /// Checked records per second
    pub throughput: f64,
    /// Run start
    pub started_at: DateTime<Utc>,
    /// Run end
    pub finished_at: DateTime<Utc>,
}

/// Statistics and distribution over one set of log entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeReport {
    /// Duration statistics in milliseconds
    pub stats: DurationStats,
    /// 0.1 s duration histogram
    pub distribution: Vec<DistributionBucket>,
}

impl ScopeReport {
    /// Compute the report for a set of entries
    ///
    /// # Errors
    /// Returns an `EmptyInput` error naming `scope` when there are no entries.
    pub fn from_entries<'a, I>(scope: &str, entries: I) -> BenchResult<Self>
    where
        I: IntoIterator<Item = &'a RunLogEntry>,
    {
        let values = durations_ms(entries);
        if values.is_empty() {
            return Err(BenchError::empty_input(scope));
        }

        Ok(Self {
            stats: DurationStats::from_millis(&values)?,
            distribution: distribution(&values)?,
        })
    }

    /// Like [`ScopeReport::from_entries`], but `None` when there are no entries
    pub fn optional<'a, I>(scope: &str, entries: I) -> BenchResult<Option<Self>>
    where
        I: IntoIterator<Item = &'a RunLogEntry>,
    {
        match Self::from_entries(scope, entries) {
            Ok(report) => Ok(Some(report)),
            Err(e) if e.kind == ErrorKind::EmptyInput => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Everything reported for one worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Worker identifier
    pub worker_id: usize,
    /// Display name
    pub name: String,
    /// PASSED when every record was checked
    pub verdict: Verdict,
    /// Records that passed
    pub passed: usize,
    /// Records the service failed to check
    pub errors: usize,
    /// Records with matches
    pub hits: usize,
    /// Total matches across hit records
    pub hit_size: usize,
    /// Why the worker stopped early
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Absent when the worker logged no chunk
    pub stats: Option<ScopeReport>,
    /// Run log in send order
    pub logs: Vec<RunLogEntry>,
}

impl WorkerReport {
    fn from_outcome(outcome: &WorkerOutcome) -> BenchResult<Self> {
        let name = worker_name(outcome.worker_id);
        let stats = ScopeReport::optional(&name, &outcome.logs)?;

        Ok(Self {
            worker_id: outcome.worker_id,
            name,
            verdict: Verdict::of(outcome.completed()),
            passed: outcome.passed,
            errors: outcome.errors,
            hits: outcome.hits,
            hit_size: outcome.hit_size,
            failure: outcome
                .failure
                .as_ref()
                .map(|f| format!("chunk {}: {}", f.chunk_sequence, f.error)),
            stats,
            logs: outcome.logs.clone(),
        })
    }
}

/// Read-only model handed to report sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Run-wide counters
    pub summary: RunSummary,
    /// Statistics over every entry of every worker; absent when no chunk
    /// was logged at all
    pub overall: Option<ScopeReport>,
    /// Per-worker sections, in worker id order
    pub workers: Vec<WorkerReport>,
}

impl ReportData {
    /// Assemble the report for a finished run
    ///
    /// A run in which no worker logged a single chunk still gets a report,
    /// with its verdicts and counters but without statistics.
    pub fn assemble(outcome: &RunOutcome) -> BenchResult<Self> {
        let overall = ScopeReport::optional(
            "the whole run",
            outcome.workers.iter().flat_map(|w| w.logs.iter()),
        )?;

        let workers = outcome
            .workers
            .iter()
            .map(WorkerReport::from_outcome)
            .collect::<BenchResult<Vec<_>>>()?;

        let summary = RunSummary {
            verdict: outcome.verdict(),
            success: outcome.is_success(),
            worker_count: outcome.workers.len(),
            failed_workers: outcome.failed_workers(),
            input_size: outcome.input_size,
            planned_checks: outcome.planned_checks(),
            executed_checks: outcome.sum_checks(),
            checked_percentage: outcome.checked_percentage(),
            total_requests: outcome.total_requests(),
            elapsed_secs: outcome.elapsed.as_secs_f64(),
            throughput: outcome.checks_per_second(),
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
        };

        Ok(Self {
            summary,
            overall,
            workers,
        })
    }

    /// Every log entry of every worker, fastest first
    pub fn all_entries_by_duration(&self) -> Vec<&RunLogEntry> {
        let mut entries: Vec<&RunLogEntry> =
            self.workers.iter().flat_map(|w| w.logs.iter()).collect();
        entries.sort_by_key(|e| e.duration_ms);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Classification, ClassificationResult};
    use std::time::Duration;

    fn entry(worker_id: usize, sequence: usize, duration_ms: u64) -> RunLogEntry {
        let mut classification = ClassificationResult::new();
        classification.register(Classification::Passed);
        classification.register(Classification::Hit(2));
        RunLogEntry {
            worker_id,
            sequence,
            started_at: Utc::now(),
            ended_at: Utc::now(),
            duration_ms,
            chunk_size: 2,
            request_body: None,
            classification,
        }
    }

    fn worker(id: usize, durations: &[u64], input_size: usize) -> WorkerOutcome {
        let mut outcome = WorkerOutcome::new(id, input_size);
        for (seq, ms) in durations.iter().enumerate() {
            outcome.record(entry(id, seq, *ms));
        }
        outcome
    }

    fn run(workers: Vec<WorkerOutcome>, input_size: usize) -> RunOutcome {
        RunOutcome {
            workers,
            input_size,
            started_at: Utc::now(),
            finished_at: Utc::now(),
            elapsed: Duration::from_secs(4),
        }
    }

    #[test]
    fn test_assemble_summary_and_sections() {
        let outcome = run(
            vec![worker(0, &[300, 100], 4), worker(1, &[200, 400], 4)],
            4,
        );

        let report = ReportData::assemble(&outcome).unwrap();

        assert_eq!(report.summary.verdict, Verdict::Passed);
        assert!(report.summary.success);
        assert_eq!(report.summary.planned_checks, 8);
        assert_eq!(report.summary.executed_checks, 8);
        assert_eq!(report.summary.total_requests, 4);
        assert_eq!(report.summary.throughput, 2.0);

        let overall = report.overall.as_ref().unwrap();
        assert_eq!(overall.stats.count, 4);
        assert_eq!(overall.stats.median, 250.0);
        assert_eq!(report.workers.len(), 2);
        assert_eq!(report.workers[0].name, "worker-0");
        assert_eq!(report.workers[0].hits, 2);
        assert_eq!(report.workers[0].hit_size, 4);
        assert_eq!(
            report.workers[1].stats.as_ref().map(|s| s.stats.max),
            Some(400.0)
        );
    }

    #[test]
    fn test_worker_without_entries_has_no_stats() {
        let mut idle = WorkerOutcome::new(1, 4);
        idle.fail(0, BenchError::service("status 500"));
        let outcome = run(vec![worker(0, &[100, 200], 4), idle], 4);

        let report = ReportData::assemble(&outcome).unwrap();

        let idle_report = &report.workers[1];
        assert!(idle_report.stats.is_none());
        assert_eq!(idle_report.verdict, Verdict::Failed);
        assert!(idle_report.failure.as_deref().unwrap().contains("status 500"));
        assert_eq!(report.summary.failed_workers, 1);
        assert!(!report.summary.success);
    }

    #[test]
    fn test_assemble_when_every_worker_fails_on_first_chunk() {
        let mut first = WorkerOutcome::new(0, 4);
        first.fail(0, BenchError::service("status 503"));
        let mut second = WorkerOutcome::new(1, 4);
        second.fail(0, BenchError::service("status 503"));
        let outcome = run(vec![first, second], 4);

        assert_eq!(outcome.exit_code(false), 0);
        assert_eq!(outcome.exit_code(true), 1);

        let report = ReportData::assemble(&outcome).unwrap();

        assert!(report.overall.is_none());
        assert_eq!(report.summary.verdict, Verdict::Failed);
        assert_eq!(report.summary.failed_workers, 2);
        assert_eq!(report.summary.executed_checks, 0);
        assert!(report.workers.iter().all(|w| w.stats.is_none()));
        assert!(report.all_entries_by_duration().is_empty());
    }

    #[test]
    fn test_scope_report_optional() {
        assert!(ScopeReport::optional("empty", std::iter::empty()).unwrap().is_none());
        let entries = [entry(0, 0, 120)];
        let scope = ScopeReport::optional("one", &entries).unwrap().unwrap();
        assert_eq!(scope.stats.count, 1);
    }

    #[test]
    fn test_all_entries_by_duration() {
        let outcome = run(
            vec![worker(0, &[300, 100], 4), worker(1, &[200, 50], 4)],
            4,
        );
        let report = ReportData::assemble(&outcome).unwrap();

        let durations: Vec<u64> = report
            .all_entries_by_duration()
            .iter()
            .map(|e| e.duration_ms)
            .collect();
        assert_eq!(durations, vec![50, 100, 200, 300]);
    }
}
