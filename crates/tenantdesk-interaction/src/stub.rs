//! Scripted `Transport` for tests.

use crate::request::RequestContext;
use crate::transport::{RawResponse, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use tenantdesk_core::{ConsoleError, Result};

/// Answers requests from a queue of scripted responses, in order, and
/// records every request it was given.
///
/// Running out of scripted responses is an `Internal` error so a test that
/// makes an unexpected call fails loudly.
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<RequestContext>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push(&self, status: u16, body: impl Into<String>) -> &Self {
        self.enqueue(Ok(RawResponse::new(status, body)));
        self
    }

    /// Queues a 200 response with `body` serialized as JSON.
    pub fn push_json(&self, body: Value) -> &Self {
        self.push(200, body.to_string())
    }

    /// Queues a `{"isvalid": true, "data": data}` envelope.
    pub fn push_data(&self, data: Value) -> &Self {
        self.push_json(serde_json::json!({ "isvalid": true, "data": data }))
    }

    /// Queues a `{"isvalid": false, "errors": [...]}` envelope.
    pub fn push_errors(&self, errors: &[&str]) -> &Self {
        self.push_json(serde_json::json!({ "isvalid": false, "errors": errors }))
    }

    /// Queues a transport-level failure.
    pub fn push_failure(&self, error: ConsoleError) -> &Self {
        self.enqueue(Err(error));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<RequestContext> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<RequestContext> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Scripted responses not consumed yet.
    pub fn pending(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn enqueue(&self, response: Result<RawResponse>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &RequestContext) -> Result<RawResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(ConsoleError::internal(format!(
                    "no scripted response for {} {}",
                    request.method, request.url
                )))
            })
    }
}
