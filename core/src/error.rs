//! Error types for compliance-bench-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of engine errors
///
/// The kind decides how far an error travels: `Service`, `Decode` and
/// `Encode` end the worker that raised them, `EmptyInput` ends report
/// generation for one scope, `Config` and `Orchestration` end the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure or non-2xx status while sending a chunk
    Service,
    /// Response body could not be decoded into per-record match lists
    Decode,
    /// Chunk could not be encoded into a request body
    Encode,
    /// Statistics requested over zero observations
    EmptyInput,
    /// Invalid or missing configuration
    Config,
    /// Worker task lifecycle failure (panic, join error)
    Orchestration,
}

impl ErrorKind {
    /// Stable identifier used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Service => "service",
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::Config => "config",
            ErrorKind::Orchestration => "orchestration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct BenchError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Human readable detail
    pub message: String,
}

impl BenchError {
    /// Create an error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Sending a chunk failed or the service answered with a non-2xx status
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Service, message)
    }

    /// Response body did not have the expected shape
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Chunk could not be turned into a request body
    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    /// Statistics over zero observations
    pub fn empty_input(scope: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::EmptyInput,
            format!("no durations recorded for {}", scope.into()),
        )
    }

    /// Invalid configuration value
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// A required builder field was never set
    pub fn missing_config(field: &str) -> Self {
        Self::new(ErrorKind::Config, format!("missing required field: {field}"))
    }

    /// Worker task could not be joined
    pub fn orchestration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Orchestration, message)
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;
