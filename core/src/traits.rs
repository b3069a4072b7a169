//! Core traits for the check client and the wire codec
//!
//! These traits are defined in core so the worker can be driven by any
//! transport or encoding. Implementations live in the client crate;
//! tests use in-memory mocks.

use crate::error::BenchError;
use crate::request::{CheckFilter, InputRecord};
use crate::response::ChunkResponse;
use async_trait::async_trait;
use std::time::Duration;

// ============================================================================
// Check Client Trait
// ============================================================================

/// Raw answer of the checking service for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP status code
    pub status: u16,

    /// Undecoded response body
    pub body: String,
}

impl ServiceResponse {
    /// Create a new response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport capability: send a request body, get status and body back
///
/// Implementations carry the target endpoint and pre-configured basic
/// credentials. One client is shared by every worker of a run.
#[async_trait]
pub trait CheckClient: Send + Sync {
    /// Endpoint requests are sent to (for logs)
    fn endpoint(&self) -> &str;

    /// Send one encoded chunk
    ///
    /// Returns the status and body for any completed exchange; only
    /// transport-level failures are errors here. Status checking is the
    /// caller's job.
    async fn send(&self, body: &str) -> Result<ServiceResponse, ClientError>;
}

/// Transport-level client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP/network error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Any other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Client could not be set up from its configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<ClientError> for BenchError {
    fn from(err: ClientError) -> Self {
        BenchError::service(err.to_string())
    }
}

// ============================================================================
// Codec Traits
// ============================================================================

/// Turns a chunk of records plus the fixed filter into a request body
pub trait RequestEncoder: Send + Sync {
    /// Encoder name for identification
    fn name(&self) -> &str;

    /// Encode one chunk
    fn encode(&self, records: &[&InputRecord], filter: &CheckFilter) -> Result<String, EncodeError>;
}

/// Turns a raw response body into per-record match lists
pub trait ResponseDecoder: Send + Sync {
    /// Decoder name for identification
    fn name(&self) -> &str;

    /// Decode one response body
    fn decode(&self, body: &str) -> Result<ChunkResponse, DecodeError>;
}

/// Encoding failure
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Serializer rejected the payload
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A record cannot be represented in the wire format
    #[error("invalid record {index}: {reason}")]
    InvalidRecord {
        /// Index of the offending record
        index: usize,
        /// Why it was rejected
        reason: String,
    },
}

impl From<EncodeError> for BenchError {
    fn from(err: EncodeError) -> Self {
        BenchError::encode(err.to_string())
    }
}

/// Decoding failure
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Body is not valid JSON of the expected shape
    #[error("malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body parsed but is missing required content
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl From<DecodeError> for BenchError {
    fn from(err: DecodeError) -> Self {
        BenchError::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_service_response_success_range() {
        assert!(ServiceResponse::new(200, "").is_success());
        assert!(ServiceResponse::new(204, "").is_success());
        assert!(!ServiceResponse::new(199, "").is_success());
        assert!(!ServiceResponse::new(301, "").is_success());
        assert!(!ServiceResponse::new(500, "").is_success());
    }

    #[test]
    fn test_client_error_maps_to_service() {
        let err: BenchError = ClientError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(err.kind, ErrorKind::Service);
        assert!(err.message.contains("timed out"));
    }

    #[test]
    fn test_decode_error_maps_to_decode() {
        let err: BenchError = DecodeError::Shape("missing simpleResponses".into()).into();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_encode_error_maps_to_encode() {
        let err: BenchError = EncodeError::InvalidRecord {
            index: 4,
            reason: "empty source".into(),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::Encode);
        assert!(err.message.contains("4"));
    }
}
