//! JSON export functionality

use anyhow::{Context, Result};
use compliance_bench_core::ReportData;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the complete report model as JSON
pub struct JsonReport;

impl JsonReport {
    /// Export the report to a JSON file
    pub fn write(report: &ReportData, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), report)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        tracing::info!(path = %path.display(), "JSON report saved");
        Ok(())
    }
}
