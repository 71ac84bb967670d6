//! GitHub API client library
//!
//! This library drives the GitHub git-data REST endpoints needed to put a set
//! of files on a fresh branch and open a pull request for them, without a
//! local clone.
//!
//! ## Modules
//!
//! - [`client`]: HTTP transport trait and the reqwest-backed implementation
//! - [`auth`]: Credentials and token handling
//! - [`observer`]: Injected logging interface for transport and actions
//! - [`response`]: The uniform [`RepoReturn`] envelope
//! - [`repo_actions`]: Branch, git data and pull request operations
//!
//! ## Pipeline
//!
//! Every operation yields a [`RepoReturn`]. An empty `sha` means the step did
//! not produce identifiable state and the caller must stop there:
//!
//! ```rust,no_run
//! use prfiles_github::{BlobRef, Credentials, PullRequestParams, RepoActions};
//!
//! # async fn example() -> prfiles_github::Result<()> {
//! let credentials = Credentials::new("octo", "hello", "octocat", "octo@example.com", "token");
//! let actions = RepoActions::connect(&credentials)?;
//!
//! let branch = actions.create_branch("main", "docs-update").await?;
//! if !branch.has_sha() {
//!     return Ok(());
//! }
//! let blob = actions.create_blob("# Hello").await?;
//! let tree = actions
//!     .create_blob_tree(&branch.sha, &[BlobRef::new(&blob.sha, "README.md")])
//!     .await?;
//! let commit = actions
//!     .create_commit("octocat", "octo@example.com", &branch.sha, &tree.sha, "Update docs")
//!     .await?;
//! actions.update_reference("docs-update", &commit.sha).await?;
//! let pr = actions
//!     .create_pull_request(PullRequestParams::new("docs-update", "main"))
//!     .await?;
//! actions.add_labels(&pr.sha, &["docs".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod consts;
pub mod error;
pub mod observer;
pub mod repo_actions;
pub mod response;

mod branches;
mod git_data;
mod pull_requests;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

// Re-export public API
pub use auth::{Credentials, GitHubAuth};
pub use client::{GitHubClient, Transport, jsonify};
pub use error::{GitHubError, Result};
pub use git_data::BlobRef;
pub use observer::{ApiEvent, ApiObserver, TracingObserver};
pub use pull_requests::{PullRequestLookup, PullRequestMatch, PullRequestParams};
pub use repo_actions::{ExistingBranchPolicy, RepoActions};
pub use response::RepoReturn;
