//! CSV export functionality

use anyhow::{Context, Result};
use compliance_bench_core::ReportData;
use csv::Writer;
use std::fs::File;
use std::path::Path;

/// Writes run log entries and summary statistics as CSV
pub struct CsvReport;

impl CsvReport {
    /// Export every log entry, fastest first
    ///
    /// With `include_requests` the request body of each chunk is added as
    /// a last column (empty when it was not retained).
    pub fn write_entries(report: &ReportData, path: &Path, include_requests: bool) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV log: {}", path.display()))?;
        let mut wtr = Writer::from_writer(file);

        let mut headers = vec![
            "duration_ms",
            "start",
            "end",
            "worker",
            "passed",
            "error",
            "hit",
            "hit_size",
        ];
        if include_requests {
            headers.push("request");
        }
        wtr.write_record(&headers)?;

        let entries = report.all_entries_by_duration();
        for entry in &entries {
            let mut row = vec![
                entry.duration_ms.to_string(),
                entry.started_at.to_rfc3339(),
                entry.ended_at.to_rfc3339(),
                compliance_bench_core::worker_name(entry.worker_id),
                entry.classification.passed.to_string(),
                entry.classification.error.to_string(),
                entry.classification.hit_count().to_string(),
                entry.classification.hit_size().to_string(),
            ];
            if include_requests {
                row.push(entry.request_body.clone().unwrap_or_default());
            }
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        tracing::info!(path = %path.display(), rows = entries.len(), "CSV log saved");
        Ok(())
    }

    /// Export summary statistics as metric/value pairs
    pub fn write_summary(report: &ReportData, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV summary: {}", path.display()))?;
        let mut wtr = Writer::from_writer(file);

        let summary = &report.summary;

        wtr.write_record(["metric", "value"])?;

        wtr.write_record(["verdict", &summary.verdict.to_string()])?;
        wtr.write_record(["workers", &summary.worker_count.to_string()])?;
        wtr.write_record(["failed_workers", &summary.failed_workers.to_string()])?;
        wtr.write_record(["input_size", &summary.input_size.to_string()])?;
        wtr.write_record(["planned_checks", &summary.planned_checks.to_string()])?;
        wtr.write_record(["executed_checks", &summary.executed_checks.to_string()])?;
        wtr.write_record([
            "checked_percent",
            &format!("{:.2}", summary.checked_percentage),
        ])?;
        wtr.write_record(["requests", &summary.total_requests.to_string()])?;
        wtr.write_record(["elapsed_secs", &format!("{:.3}", summary.elapsed_secs)])?;
        wtr.write_record(["throughput_per_sec", &format!("{:.2}", summary.throughput)])?;

        // Duration rows only exist when at least one chunk was logged
        if let Some(overall) = &report.overall {
            let stats = &overall.stats;
            wtr.write_record(["mean_ms", &format!("{:.2}", stats.mean)])?;
            wtr.write_record(["min_ms", &format!("{:.2}", stats.min)])?;
            wtr.write_record(["max_ms", &format!("{:.2}", stats.max)])?;
            wtr.write_record(["median_ms", &format!("{:.2}", stats.median)])?;
            wtr.write_record(["mode_ms", &format!("{:.2}", stats.mode)])?;
            wtr.write_record(["p90_ms", &format!("{:.2}", stats.p90)])?;
            wtr.write_record(["p95_ms", &format!("{:.2}", stats.p95)])?;
            wtr.write_record(["p99_ms", &format!("{:.2}", stats.p99)])?;
            wtr.write_record(["std_dev_ms", &format!("{:.2}", stats.std_dev)])?;
            wtr.write_record(["variance", &format!("{:.2}", stats.variance)])?;
            wtr.write_record([
                "population_variance",
                &format!("{:.2}", stats.population_variance),
            ])?;
            wtr.write_record(["sum_secs", &format!("{:.3}", stats.sum_secs())])?;
        }

        wtr.flush()?;
        tracing::info!(path = %path.display(), "CSV summary saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn test_entries_sorted_by_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        CsvReport::write_entries(&fixtures::report(), &path, false).unwrap();

        let (headers, rows) = read_rows(&path);
        assert_eq!(headers.len(), 8);
        assert_eq!(&headers[0], "duration_ms");

        let durations: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(durations, vec!["110", "240", "320"]);
        assert_eq!(rows[0].get(3), Some("worker-0"));
        assert_eq!(rows[0].get(5), Some("1"));
        assert_eq!(rows[1].get(6), Some("1"));
        assert_eq!(rows[1].get(7), Some("2"));
    }

    #[test]
    fn test_entries_with_requests() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        CsvReport::write_entries(&fixtures::report(), &path, true).unwrap();

        let (headers, rows) = read_rows(&path);
        assert_eq!(&headers[8], "request");
        assert_eq!(rows[1].get(8), Some(r#"{"input":["C1","N0"]}"#));
    }

    #[test]
    fn test_summary_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        CsvReport::write_summary(&fixtures::report(), &path).unwrap();

        let (_, rows) = read_rows(&path);
        let lookup = |name: &str| {
            rows.iter()
                .find(|r| r.get(0) == Some(name))
                .and_then(|r| r.get(1))
                .map(str::to_string)
        };

        assert_eq!(lookup("verdict").as_deref(), Some("FAILED"));
        assert_eq!(lookup("planned_checks").as_deref(), Some("8"));
        assert_eq!(lookup("executed_checks").as_deref(), Some("6"));
        assert_eq!(lookup("median_ms").as_deref(), Some("240.00"));
        assert_eq!(lookup("max_ms").as_deref(), Some("320.00"));
    }

    #[test]
    fn test_summary_without_logged_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        CsvReport::write_summary(&fixtures::service_down_report(), &path).unwrap();

        let (_, rows) = read_rows(&path);
        let names: Vec<&str> = rows.iter().filter_map(|r| r.get(0)).collect();
        assert!(names.contains(&"verdict"));
        assert!(names.contains(&"failed_workers"));
        assert!(!names.contains(&"median_ms"));
        assert!(!names.contains(&"sum_secs"));
    }
}
