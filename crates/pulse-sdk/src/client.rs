//! Pulse REST client implementation.

use crate::endpoint::Endpoint;
use crate::error::SdkError;
use crate::wire;
use pulse_domain::{AnalyticsSnapshot, Camera, Incident};
use serde_json::Value;
use std::time::Duration;

/// Default timeout for REST requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the edge server's snapshot resources
///
/// Requests are unauthenticated `GET`s. Each call is independent; there is
/// no caching and no retry.
#[derive(Debug, Clone)]
pub struct PulseClient {
    endpoint: Endpoint,
    http: reqwest::Client,
}

impl PulseClient {
    /// Create a client with the default request timeout
    pub fn new(endpoint: Endpoint) -> Result<Self, SdkError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(endpoint: Endpoint, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, http })
    }

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch recent incidents (`GET /api/incidents`)
    pub async fn get_incidents(&self) -> Result<Vec<Incident>, SdkError> {
        let body = self.fetch("incidents").await?;
        Ok(wire::decode_incident_list(body)?)
    }

    /// Fetch the analytics snapshot (`GET /api/analytics`)
    pub async fn get_analytics(&self) -> Result<AnalyticsSnapshot, SdkError> {
        let body = self.fetch("analytics").await?;
        Ok(wire::decode_analytics(body)?)
    }

    /// Fetch camera status (`GET /api/cameras`)
    pub async fn get_cameras(&self) -> Result<Vec<Camera>, SdkError> {
        let body = self.fetch("cameras").await?;
        Ok(wire::decode_camera_list(body)?)
    }

    async fn fetch(&self, resource: &str) -> Result<Value, SdkError> {
        let url = self.endpoint.api_url(resource);
        tracing::debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(%url, status = status.as_u16(), "request failed");
            return Err(SdkError::HttpStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_endpoint() {
        let endpoint = Endpoint::parse("http://edge:8000").unwrap();
        let client = PulseClient::new(endpoint.clone()).unwrap();
        assert_eq!(client.endpoint(), &endpoint);
    }
}
