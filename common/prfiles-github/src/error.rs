//! Error types for the GitHub client
//!
//! Only transport-level problems and missing credentials are errors. HTTP
//! status codes are not: a non-2xx response is still decoded and handed back,
//! and callers inspect the [`RepoReturn`](crate::RepoReturn) fields instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Errors that can occur while talking to GitHub
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Required credentials were not supplied
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    /// A credential value cannot be used in an HTTP header
    #[error("Invalid header value for {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request payload could not be encoded
    #[error("Failed to encode request payload: {0}")]
    Payload(#[from] serde_json::Error),
}
