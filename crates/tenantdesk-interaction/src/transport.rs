//! The I/O seam between request building and the network.

use crate::request::{Method, RequestContext};
use async_trait::async_trait;
use reqwest::Client;
use tenantdesk_core::{ConsoleError, Result};

/// Status and body text of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one fully built request and returns whatever came back.
///
/// Implementations do not interpret the status or body; anything short of
/// an HTTP response is a `ConsoleError::Network`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestContext) -> Result<RawResponse>;
}

/// `Transport` over a shared reqwest client.
///
/// No timeout is configured beyond reqwest's defaults.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestContext) -> Result<RawResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ConsoleError::network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ConsoleError::network(format!("failed to read response body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}
