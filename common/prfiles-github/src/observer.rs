//! Observability hooks for the transport and repo actions
//!
//! Both [`GitHubClient`](crate::GitHubClient) and
//! [`RepoActions`](crate::RepoActions) report what they do through an
//! [`ApiObserver`] they are handed at construction. [`TracingObserver`] is the
//! default and forwards everything to `tracing`; tests swap in their own
//! observer to capture events.

use std::time::Duration;

/// Something worth reporting while talking to GitHub
#[derive(Debug)]
pub enum ApiEvent<'a> {
    /// A response was received, whatever its status
    Response {
        method: &'static str,
        endpoint: &'a str,
        status: u16,
        elapsed: Duration,
        request_bytes: usize,
        body: &'a [u8],
    },
    /// A repo action is about to run
    Action {
        action: &'static str,
        detail: String,
    },
    /// A recoverable oddity the caller may want to know about
    Warning { message: String },
}

impl ApiEvent<'_> {
    /// `true` for responses outside the 2xx range
    pub fn is_error_response(&self) -> bool {
        matches!(self, ApiEvent::Response { status, .. } if !(200..300).contains(status))
    }
}

/// Receives [`ApiEvent`]s
pub trait ApiObserver: Send + Sync {
    fn observe(&self, event: &ApiEvent<'_>);
}

/// Default observer that logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ApiObserver for TracingObserver {
    fn observe(&self, event: &ApiEvent<'_>) {
        match event {
            ApiEvent::Response {
                method,
                endpoint,
                status,
                elapsed,
                request_bytes,
                body,
            } => {
                if event.is_error_response() {
                    tracing::error!(
                        %method,
                        %endpoint,
                        status,
                        body = %String::from_utf8_lossy(body),
                        "GitHub returned an error status"
                    );
                }
                tracing::debug!(
                    %method,
                    %endpoint,
                    status,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    request_bytes,
                    response_bytes = body.len(),
                    "GitHub API call"
                );
            }
            ApiEvent::Action { action, detail } => {
                tracing::debug!(%action, "{detail}");
            }
            ApiEvent::Warning { message } => {
                tracing::warn!("{message}");
            }
        }
    }
}
