//! The single place outbound calls go through.
//!
//! Adapters never touch an HTTP client directly. They assemble a
//! [`RequestDescriptor`] and hand it to a [`RequestExecutor`]; swapping the
//! transport, or substituting [`RecordingExecutor`] in tests, touches only
//! the executor value an adapter is constructed with.

pub mod http;
pub mod recording;

pub use http::HttpExecutor;
pub use recording::RecordingExecutor;

use crate::error::ExecutorError;

use std::future::Future;
use std::sync::Arc;

use reqwest::Method;

/// One outbound call: method, endpoint relative to the service base URL,
/// optional payload, extra headers and query pairs.
///
/// Built once, never mutated in place, consumed by [`RequestExecutor::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    endpoint: String,
    payload: Option<String>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            payload: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Query value for `name`, if present.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Turns a [`RequestDescriptor`] into a raw response body.
///
/// Implementations hold no per-call state, so one executor may serve many
/// concurrent calls.
pub trait RequestExecutor: Send + Sync {
    /// Issue exactly one call and return the response body unmodified.
    fn execute(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<String, ExecutorError>> + Send;
}

impl<T: RequestExecutor> RequestExecutor for Arc<T> {
    fn execute(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<String, ExecutorError>> + Send {
        (**self).execute(request)
    }
}
