//! CLI argument parsing and run dispatch

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use compliance_bench_client::{ClientConfig, HttpCheckClient, JsonRequestEncoder, JsonResponseDecoder};
use compliance_bench_core::{CheckFilter, OrchestratorBuilder, ReportData, RunConfig};
use compliance_bench_dataset::load_input_set;
use compliance_bench_report::{CsvReport, JsonReport};

/// Load test for a compliance checking service
///
/// Every thread checks the whole input file in its own random order,
/// sending it in chunks to `<url>/check/list`.
#[derive(Parser, Debug)]
#[command(name = "compliance-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of concurrent workers
    #[arg(short = 't', long)]
    pub threads: usize,

    /// Number of records sent in one request
    #[arg(short = 'c', long)]
    pub chunks: usize,

    /// Base URL of the service
    #[arg(short = 'u', long)]
    pub url: String,

    /// Input file (.sdf/.sd blocks, otherwise one record per line)
    #[arg(short = 'f', long, default_value = "input.txt")]
    pub file: PathBuf,

    /// Basic auth user
    #[arg(long, env = "CC_HTTP_USER", default_value = "admin")]
    pub http_user: String,

    /// Basic auth password
    #[arg(long, env = "CC_HTTP_PASSWORD", default_value = "adminPass", hide_env_values = true)]
    pub http_password: String,

    /// Where to save the JSON report
    #[arg(short = 's', long, default_value = "report.json")]
    pub save: PathBuf,

    /// Also save every chunk as a CSV log
    #[arg(long)]
    pub csv_log: Option<PathBuf>,

    /// Also save summary statistics as CSV
    #[arg(long)]
    pub csv_summary: Option<PathBuf>,

    /// Exit with status 1 when any worker could not finish
    #[arg(short = 'x', long)]
    pub fail_on_error: bool,

    /// Keep every request body in the report
    #[arg(short = 'i', long)]
    pub save_input_in_report: bool,

    /// Date the legislation is checked against
    #[arg(short = 'd', long)]
    pub date_to_check: Option<String>,

    /// Restrict the check to a category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Seed for reproducible worker orderings
    #[arg(long)]
    pub seed: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fixed filter parameters from the command line
    pub fn filter(&self) -> CheckFilter {
        let mut filter = CheckFilter::none();
        if let Some(date) = &self.date_to_check {
            filter = filter.with_date(date.clone());
        }
        if !self.categories.is_empty() {
            filter = filter.with_categories(self.categories.iter().cloned());
        }
        filter
    }

    /// Run configuration from the command line
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(self.threads, self.chunks)
            .with_filter(self.filter())
            .with_retained_request_bodies(self.save_input_in_report)
            .with_fail_on_error(self.fail_on_error);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    /// Client configuration from the command line
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.url)
            .with_credentials(&self.http_user, &self.http_password)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Run the load test and persist the report
    ///
    /// Returns the process exit status.
    pub async fn run(&self) -> Result<i32> {
        tracing::info!(
            threads = self.threads,
            chunk_size = self.chunks,
            url = %self.url,
            user = %self.http_user,
            input_file = %self.file.display(),
            output_file = %self.save.display(),
            fail_on_error = self.fail_on_error,
            save_input = self.save_input_in_report,
            date_to_check = ?self.date_to_check,
            categories = ?self.categories,
            "Starting compliance-bench"
        );

        // 1. Load the input set before anything is sent
        let input = load_input_set(&self.file)
            .with_context(|| format!("Could not load records from {}", self.file.display()))?;
        tracing::info!(records = input.len(), "Input set loaded");

        // 2. Wire up client and codec
        let client = HttpCheckClient::new(self.client_config())
            .context("Failed to create check client")?;

        let config = self.run_config();
        let fail_on_error = config.fail_on_error;

        let orchestrator = OrchestratorBuilder::new()
            .config(config)
            .input(input)
            .client(Arc::new(client))
            .encoder(Arc::new(JsonRequestEncoder::new()))
            .decoder(Arc::new(JsonResponseDecoder::new()))
            .build()
            .context("Invalid run configuration")?;

        // 3. Run
        let outcome = orchestrator.run().await?;

        // 4. Persist the report before deciding the exit status
        let report = ReportData::assemble(&outcome).context("Failed to assemble report")?;
        JsonReport::write(&report, &self.save)?;

        if let Some(path) = &self.csv_log {
            CsvReport::write_entries(&report, path, self.save_input_in_report)?;
        }
        if let Some(path) = &self.csv_summary {
            CsvReport::write_summary(&report, path)?;
        }

        Ok(outcome.exit_code(fail_on_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["compliance-bench", "-t", "4", "-c", "10", "-u", "http://host/cc"])
            .unwrap();

        assert_eq!(cli.threads, 4);
        assert_eq!(cli.chunks, 10);
        assert_eq!(cli.file, PathBuf::from("input.txt"));
        assert_eq!(cli.save, PathBuf::from("report.json"));
        assert_eq!(cli.timeout_secs, 60);
        assert!(!cli.fail_on_error);
        assert!(cli.csv_log.is_none());
        assert_eq!(cli.filter(), CheckFilter::none());
    }

    #[test]
    fn test_cli_requires_threads_chunks_and_url() {
        assert!(Cli::try_parse_from(["compliance-bench", "-c", "10", "-u", "http://host"]).is_err());
        assert!(Cli::try_parse_from(["compliance-bench", "-t", "1", "-u", "http://host"]).is_err());
        assert!(Cli::try_parse_from(["compliance-bench", "-t", "1", "-c", "10"]).is_err());
    }

    #[test]
    fn test_cli_builds_configs() {
        let cli = Cli::try_parse_from([
            "compliance-bench",
            "--threads",
            "2",
            "--chunks",
            "5",
            "--url",
            "http://host/cc",
            "--http-user",
            "bench",
            "--http-password",
            "s3cret",
            "-x",
            "-i",
            "-d",
            "2017-05-01",
            "--category",
            "Narcotics",
            "--category",
            "Precursors",
            "--seed",
            "42",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        let config = cli.run_config();
        assert_eq!(config.workers, 2);
        assert_eq!(config.chunk_size, 5);
        assert!(config.fail_on_error);
        assert!(config.retain_request_bodies);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.filter.date.as_deref(), Some("2017-05-01"));
        assert_eq!(
            config.filter.categories,
            Some(vec!["Narcotics".to_string(), "Precursors".to_string()])
        );

        let client = cli.client_config();
        assert_eq!(client.endpoint(), "http://host/cc/check/list");
        assert_eq!(client.user, "bench");
        assert_eq!(client.password, "s3cret");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
