//! Thin JSON HTTP client for the API suites.
//!
//! Wraps a shared `reqwest::Client` with the small surface the probes need:
//! verb + path + optional JSON body in, status + decoded JSON out.

use std::time::Duration;

use reqwest::{Client, Method};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("response body was not JSON: {0}")]
    Decode(String),
}

/// Status plus decoded body of a completed request.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    status: u16,
    body: Value,
}

impl ProbeResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn json(&self) -> &Value {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON API client rooted at a base URL.
pub struct HttpProbe {
    client: Client,
    base: String,
}

impl HttpProbe {
    pub fn new(base: impl Into<String>) -> Result<Self, HttpError> {
        Self::with_timeout(base, Duration::from_secs(15))
    }

    pub fn with_timeout(base: impl Into<String>, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| HttpError::Client(err.to_string()))?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Absolute URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get(&self, path: &str) -> Result<ProbeResponse, HttpError> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ProbeResponse, HttpError> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<ProbeResponse, HttpError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ProbeResponse, HttpError> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ProbeResponse, HttpError> {
        let url = self.url_for(path);
        debug!(%method, %url, "sending probe request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| HttpError::Request(err.to_string()))?;
        let status = response.status().as_u16();

        // DELETE responses are frequently empty; treat an empty body as null
        let bytes = response
            .bytes()
            .await
            .map_err(|err| HttpError::Request(err.to_string()))?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|err| HttpError::Decode(err.to_string()))?
        };

        Ok(ProbeResponse { status, body })
    }
}
