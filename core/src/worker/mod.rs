//! Worker module for checking the input set against the service
//!
//! Each Worker is one tokio task that walks the complete input set in its
//! own random order and sends it in fixed-size chunks:
//!
//! 1. Takes the next chunk of its permutation
//! 2. Encodes it together with the filter parameters
//! 3. Sends it via the shared CheckClient and times the exchange
//! 4. Decodes and classifies every record of the response
//! 5. Appends a RunLogEntry and updates its counters
//! 6. Repeats until the permutation is exhausted or a chunk fails
//!
//! The first failing chunk ends the worker; nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use compliance_bench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .input(input)
//!     .client(client)
//!     .encoder(encoder)
//!     .decoder(decoder)
//!     .chunk_size(10)
//!     .build()?;
//!
//! let outcome = worker.run().await;
//! println!("Completed: {}", outcome.completed());
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::{WorkerFailure, WorkerOutcome};

/// Display name of a worker in logs and reports
pub fn worker_name(id: usize) -> String {
    format!("worker-{id}")
}
