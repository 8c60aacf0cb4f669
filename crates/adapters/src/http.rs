// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound HTTP capability.
//!
//! The engine only needs two verbs: a form-encoded POST for the token
//! exchange and an authorized GET for probes. Responses of any status are
//! returned as `Ok`; callers decide what a non-2xx status means.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from HTTP operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid client configuration: {0}")]
    Client(String),
}

/// A fully read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// 200 response with a JSON body.
    pub fn ok_json(value: serde_json::Value) -> Self {
        Self::new(200, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. `None` if it is not valid JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Adapter for outbound HTTP calls
#[async_trait]
pub trait HttpAdapter: Clone + Send + Sync + 'static {
    /// POST `form` as `application/x-www-form-urlencoded`.
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, String)],
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError>;

    /// GET `url` with the given headers.
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse, HttpError>;
}

/// Per-request timeout for the real client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed adapter. Cheap to clone; clones share one connection pool.
///
/// Headers are passed per request, never set as client defaults, so one
/// job's bearer token cannot leak into another job's requests.
#[derive(Clone, Debug)]
pub struct ReqwestHttpAdapter {
    client: reqwest::Client,
}

impl ReqwestHttpAdapter {
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, HttpError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpAdapter for ReqwestHttpAdapter {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, String)],
        form: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        let mut request = self.client.post(url).form(form);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        self.send(request).await
    }

    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse, HttpError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        self.send(request).await
    }
}

fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Request(e.to_string())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{HttpAdapter, HttpError, HttpResponse};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HttpMethod {
        Get,
        Post,
    }

    /// Recorded request
    #[derive(Debug, Clone)]
    pub struct HttpCall {
        pub method: HttpMethod,
        pub url: String,
        pub headers: Vec<(String, String)>,
        pub form: Vec<(String, String)>,
    }

    impl HttpCall {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn form_field(&self, name: &str) -> Option<&str> {
            self.form.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
        }
    }

    type Handler = dyn Fn(&HttpCall) -> Result<HttpResponse, HttpError> + Send + Sync;

    struct FakeHttpState {
        calls: Vec<HttpCall>,
        handler: Arc<Handler>,
        latency: Duration,
    }

    /// Scripted HTTP adapter for testing.
    ///
    /// Every request is recorded and answered by the installed handler
    /// (default: `200 {}`), after an optional simulated latency.
    #[derive(Clone)]
    pub struct FakeHttpAdapter {
        inner: Arc<Mutex<FakeHttpState>>,
    }

    impl Default for FakeHttpAdapter {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeHttpState {
                    calls: Vec::new(),
                    handler: Arc::new(|_| Ok(HttpResponse::new(200, "{}"))),
                    latency: Duration::ZERO,
                })),
            }
        }
    }

    impl FakeHttpAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer every request with `handler`.
        pub fn set_handler(
            &self,
            handler: impl Fn(&HttpCall) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
        ) {
            self.inner.lock().handler = Arc::new(handler);
        }

        /// Delay every response by `latency`.
        pub fn set_latency(&self, latency: Duration) {
            self.inner.lock().latency = latency;
        }

        /// Get all recorded requests
        pub fn calls(&self) -> Vec<HttpCall> {
            self.inner.lock().calls.clone()
        }

        pub fn gets(&self) -> Vec<HttpCall> {
            self.calls().into_iter().filter(|c| c.method == HttpMethod::Get).collect()
        }

        pub fn posts(&self) -> Vec<HttpCall> {
            self.calls().into_iter().filter(|c| c.method == HttpMethod::Post).collect()
        }

        async fn record(&self, call: HttpCall) -> Result<HttpResponse, HttpError> {
            let (handler, latency) = {
                let mut state = self.inner.lock();
                state.calls.push(call.clone());
                (Arc::clone(&state.handler), state.latency)
            };
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            handler(&call)
        }
    }

    fn owned_headers(headers: &[(&str, String)]) -> Vec<(String, String)> {
        headers.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[async_trait]
    impl HttpAdapter for FakeHttpAdapter {
        async fn post_form(
            &self,
            url: &str,
            headers: &[(&str, String)],
            form: &[(&str, &str)],
        ) -> Result<HttpResponse, HttpError> {
            self.record(HttpCall {
                method: HttpMethod::Post,
                url: url.to_string(),
                headers: owned_headers(headers),
                form: form.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            })
            .await
        }

        async fn get(
            &self,
            url: &str,
            headers: &[(&str, String)],
        ) -> Result<HttpResponse, HttpError> {
            self.record(HttpCall {
                method: HttpMethod::Get,
                url: url.to_string(),
                headers: owned_headers(headers),
                form: Vec::new(),
            })
            .await
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeHttpAdapter, HttpCall, HttpMethod};

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
