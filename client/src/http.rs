//! reqwest-backed check client

use std::time::Duration;

use async_trait::async_trait;
use compliance_bench_core::{CheckClient, ClientError, ServiceResponse};
use reqwest::header::CONTENT_TYPE;

use crate::config::{ClientConfig, ConfigValidationError};

impl From<ConfigValidationError> for ClientError {
    fn from(err: ConfigValidationError) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// Sends encoded chunks to `{base_url}/check/list`
///
/// Credentials are attached to every request up front, so the service
/// never has to answer with a 401 challenge first. One instance is shared
/// by every worker; reqwest pools the connections.
pub struct HttpCheckClient {
    client: reqwest::Client,
    endpoint: String,
    user: String,
    password: String,
    timeout: Duration,
}

impl HttpCheckClient {
    /// Build a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            user: config.user,
            password: config.password,
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl CheckClient for HttpCheckClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, body: &str) -> Result<ServiceResponse, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.timeout)
                } else {
                    ClientError::Http(e)
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::trace!(status, bytes = body.len(), "Check response received");

        Ok(ServiceResponse::new(status, body))
    }
}

impl std::fmt::Debug for HttpCheckClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCheckClient")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("timeout", &self.timeout)
            .finish()
    }
}
