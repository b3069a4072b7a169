//! HTTP check client and JSON wire codec
//!
//! This crate provides the production implementations of the core traits:
//!
//! - [`HttpCheckClient`]: `CheckClient` over reqwest with preemptive basic auth
//! - [`JsonRequestEncoder`]: `RequestEncoder` for the `/check/list` body
//! - [`JsonResponseDecoder`]: `ResponseDecoder` for `simpleResponses`

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod config;
mod http;

pub use codec::{JsonRequestEncoder, JsonResponseDecoder};
pub use config::{ClientConfig, ConfigValidationError};
pub use http::HttpCheckClient;
