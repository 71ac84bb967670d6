//! GitHub HTTP transport
//!
//! This module provides the [`Transport`] seam used by
//! [`RepoActions`](crate::RepoActions) and [`GitHubClient`], its
//! reqwest-backed implementation. The transport never fails on an HTTP status:
//! a non-2xx response is reported to the observer and its body is still
//! decoded and returned. Only connection-level failures surface as errors.

use crate::auth::GitHubAuth;
use crate::consts::{ACCEPT_HEADER, API_BASE, REQUEST_TIMEOUT};
use crate::error::{GitHubError, Result};
use crate::observer::{ApiEvent, ApiObserver, TracingObserver};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;

/// Minimal HTTP interface the repo actions are written against
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET to `endpoint` (path relative to the API root)
    async fn get(&self, endpoint: &str) -> Result<Value>;

    /// Issue a POST to `endpoint` with `payload` as the JSON body
    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value>;
}

/// GitHub API client for making authenticated requests
pub struct GitHubClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) auth: GitHubAuth,
    pub(crate) observer: Arc<dyn ApiObserver>,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// The fixed headers (Accept, User-Agent, Authorization) are attached to
    /// every request made by this client.
    ///
    /// # Errors
    /// Returns an error if the username or token cannot be used as a header
    /// value, or if the underlying HTTP client cannot be built.
    pub fn new(auth: GitHubAuth) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        headers.insert(USER_AGENT, header_value("User-Agent", &auth.username)?);

        let mut authorization = header_value("Authorization", &auth.get_auth_header())?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: API_BASE.to_string(),
            auth,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Point the client at another API root (GitHub Enterprise, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the default tracing observer
    pub fn with_observer(mut self, observer: Arc<dyn ApiObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Login used as the User-Agent
    pub fn username(&self) -> &str {
        &self.auth.username
    }

    async fn send(
        &self,
        method: &'static str,
        endpoint: &str,
        request: reqwest::RequestBuilder,
        request_bytes: usize,
    ) -> Result<Value> {
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        self.observer.observe(&ApiEvent::Response {
            method,
            endpoint,
            status: status.as_u16(),
            elapsed: started.elapsed(),
            request_bytes,
            body: &body,
        });

        Ok(jsonify(&body))
    }
}

#[async_trait]
impl Transport for GitHubClient {
    async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let request = self.client.get(&url);
        self.send("GET", endpoint, request, 0).await
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let body = serde_json::to_vec(payload)?;
        let request_bytes = body.len();
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        self.send("POST", endpoint, request, request_bytes).await
    }
}

/// Translate response bytes to JSON
///
/// Bytes that do not decode become `{"error": "<raw body>"}` so callers have a
/// single structured signal to check instead of a decode failure.
pub fn jsonify(data: &[u8]) -> Value {
    serde_json::from_slice(data)
        .unwrap_or_else(|_| json!({ "error": String::from_utf8_lossy(data) }))
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|source| GitHubError::InvalidHeader { name, source })
}
