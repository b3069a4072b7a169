//! compliance-bench-core: Core engine for load testing a legislation check service
//!
//! This crate provides the engine used by every compliance-bench component,
//! including:
//!
//! - Input records, filter parameters and decoded responses
//! - Core traits (CheckClient, RequestEncoder, ResponseDecoder)
//! - Workers and the orchestrator that runs them
//! - Duration statistics and the report data model
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod request;
pub mod response;
pub mod traits;
pub mod worker;

pub use config::{ConfigError, RunConfig};
pub use error::*;
pub use metrics::*;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, RunOutcome, Verdict};
pub use report::{ReportData, RunSummary, ScopeReport, WorkerReport};
pub use request::*;
pub use response::*;
pub use traits::*;
pub use worker::{worker_name, Worker, WorkerBuilder, WorkerFailure, WorkerOutcome};
