//! Orchestrator for run lifecycle management
//!
//! The Orchestrator coordinates a complete load run:
//! - Drawing every worker's permutation before any request is sent
//! - Spawning one tokio task per worker
//! - Joining every task, even after a sibling failed
//! - Logging per-worker and global verdicts
//!
//! # Example
//!
//! ```ignore
//! use compliance_bench_core::{OrchestratorBuilder, RunConfig};
//!
//! let orchestrator = OrchestratorBuilder::new()
//!     .config(RunConfig::new(4, 10))
//!     .input(input)
//!     .client(client)
//!     .encoder(encoder)
//!     .decoder(decoder)
//!     .build()?;
//!
//! let outcome = orchestrator.run().await?;
//! std::process::exit(outcome.exit_code(true));
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::{RunOutcome, Verdict};
pub use builder::OrchestratorBuilder;
pub use executor::Orchestrator;
