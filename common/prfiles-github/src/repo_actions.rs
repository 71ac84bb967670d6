//! Repository actions against the GitHub API
//!
//! [`RepoActions`] composes a [`Transport`] with the owner and name of one
//! repository. The operations themselves live in sibling modules, each adding
//! an `impl` block for one group of endpoints:
//! - `branches.rs` - get/create branch, update reference
//! - `git_data.rs` - blobs, trees and commits
//! - `pull_requests.rs` - pull requests and labels

use crate::auth::Credentials;
use crate::client::{GitHubClient, Transport};
use crate::consts::API_BASE;
use crate::error::Result;
use crate::observer::{ApiEvent, ApiObserver, TracingObserver};
use std::sync::Arc;

/// What `create_branch` does when the new branch already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingBranchPolicy {
    /// Report failure with an empty SHA
    #[default]
    Fail,
    /// Look up the existing branch and continue from its head
    Reuse,
}

/// Actions for one repository in GitHub
pub struct RepoActions<T: Transport> {
    pub(crate) transport: T,
    pub(crate) owner: String,
    pub(crate) repo: String,
    pub(crate) branch_policy: ExistingBranchPolicy,
    pub(crate) observer: Arc<dyn ApiObserver>,
}

impl<T: Transport> RepoActions<T> {
    pub fn new(transport: T, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            transport,
            owner: owner.into(),
            repo: repo.into(),
            branch_policy: ExistingBranchPolicy::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_branch_policy(mut self, policy: ExistingBranchPolicy) -> Self {
        self.branch_policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ApiObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch_policy(&self) -> ExistingBranchPolicy {
        self.branch_policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `/repos/{owner}/{repo}{suffix}`
    pub(crate) fn endpoint(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{}", self.owner, self.repo, suffix)
    }

    pub(crate) fn action(&self, action: &'static str, detail: String) {
        self.observer.observe(&ApiEvent::Action { action, detail });
    }

    pub(crate) fn warn(&self, message: String) {
        self.observer.observe(&ApiEvent::Warning { message });
    }
}

impl RepoActions<GitHubClient> {
    /// Build actions backed by a [`GitHubClient`] for the given credentials
    ///
    /// # Errors
    /// Returns an error if the credentials are incomplete or cannot be turned
    /// into request headers. No request is made.
    pub fn connect(credentials: &Credentials) -> Result<Self> {
        Self::connect_to(credentials, API_BASE)
    }

    /// Same as [`RepoActions::connect`] against another API root
    pub fn connect_to(credentials: &Credentials, base_url: &str) -> Result<Self> {
        credentials.validate()?;
        let client = GitHubClient::new(credentials.auth())?.with_base_url(base_url);
        Ok(Self::new(client, &credentials.owner, &credentials.repo))
    }
}
