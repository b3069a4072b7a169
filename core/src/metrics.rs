//! Run log entries and duration statistics

use crate::error::{BenchError, BenchResult};
use crate::response::ClassificationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Width of one distribution bucket in milliseconds
const BUCKET_WIDTH_MS: f64 = 100.0;

/// One chunk sent by one worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    /// Worker that sent the chunk
    pub worker_id: usize,

    /// Position of the chunk within its worker's run (0-based)
    pub sequence: usize,

    /// Wall-clock time the request was sent
    pub started_at: DateTime<Utc>,

    /// Wall-clock time the response was classified
    pub ended_at: DateTime<Utc>,

    /// Round trip including decoding and classification
    pub duration_ms: u64,

    /// Number of records in the chunk
    pub chunk_size: usize,

    /// Request body, kept only when input echo is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,

    /// Classified response
    pub classification: ClassificationResult,
}

/// Durations of a list of entries, in milliseconds
pub fn durations_ms<'a, I>(entries: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a RunLogEntry>,
{
    entries
        .into_iter()
        .map(|entry| entry.duration_ms as f64)
        .collect()
}

/// Descriptive statistics over a list of durations (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Sum of all values
    pub sum: f64,
    /// Unbiased sample variance (n - 1)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Population variance (n)
    pub population_variance: f64,
    /// 50th percentile
    pub median: f64,
    /// Most frequent value, largest on ties
    pub mode: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl DurationStats {
    /// Compute statistics from durations in milliseconds
    ///
    /// # Errors
    /// Returns an `EmptyInput` error when `values` is empty.
    pub fn from_millis(values: &[f64]) -> BenchResult<Self> {
        if values.is_empty() {
            return Err(BenchError::empty_input("duration statistics"));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        let n = len as f64;
        let sum: f64 = sorted.iter().sum();
        let mean = sum / n;
        let squared_deviations: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();

        let variance = if len > 1 {
            squared_deviations / (n - 1.0)
        } else {
            0.0
        };
        let population_variance = squared_deviations / n;

        Ok(Self {
            count: len,
            mean,
            min: sorted[0],
            max: sorted[len - 1],
            sum,
            variance,
            std_dev: variance.sqrt(),
            population_variance,
            median: percentile(&sorted, 0.50),
            mode: mode_of_sorted(&sorted),
            p90: percentile(&sorted, 0.90),
            p95: percentile(&sorted, 0.95),
            p99: percentile(&sorted, 0.99),
        })
    }

    /// Sum in seconds
    pub fn sum_secs(&self) -> f64 {
        self.sum / 1000.0
    }
}

/// Calculate percentile from sorted values using linear interpolation
///
/// `p` is a fraction in `[0, 1]`; the rank is `p * (n - 1)`.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let idx = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    let frac = idx - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

/// Most frequent value of an ascending slice; the largest wins ties
fn mode_of_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_run = 0;
    let mut run_start = 0;

    for idx in 1..=sorted.len() {
        if idx == sorted.len() || sorted[idx] != sorted[run_start] {
            let run = idx - run_start;
            // Ascending order: `>=` lets a later, larger value take a tie.
            if run >= best_run {
                best_run = run;
                best = sorted[run_start];
            }
            run_start = idx;
        }
    }

    best
}

/// One 0.1 second wide bucket of the duration distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Lower edge in seconds, rounded to one decimal
    pub lower_edge_secs: f64,
    /// Durations whose own one-decimal rounding equals the lower edge
    pub count: usize,
}

/// Dense 0.1 s histogram of durations given in milliseconds
///
/// Buckets start at the minimum and step by 0.1 s while the step stays
/// below the maximum; empty buckets are kept. A single distinct value
/// yields no buckets.
///
/// # Errors
/// Returns an `EmptyInput` error when `values` is empty.
pub fn distribution(values: &[f64]) -> BenchResult<Vec<DistributionBucket>> {
    if values.is_empty() {
        return Err(BenchError::empty_input("duration distribution"));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &value in values {
        *counts.entry(round_to_tenth_secs(value)).or_insert(0) += 1;
    }

    let base = round_to_tenth_secs(min);
    let mut buckets = Vec::new();
    let mut step: i64 = 0;
    while min + step as f64 * BUCKET_WIDTH_MS < max {
        let key = base + step;
        buckets.push(DistributionBucket {
            lower_edge_secs: key as f64 / 10.0,
            count: counts.get(&key).copied().unwrap_or(0),
        });
        step += 1;
    }

    Ok(buckets)
}

/// Milliseconds to seconds rounded half-up to one decimal, in tenths
fn round_to_tenth_secs(ms: f64) -> i64 {
    (ms / BUCKET_WIDTH_MS).round() as i64
}
