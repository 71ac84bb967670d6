//! Types for the pull request pipeline

use crate::constants::github::{DEFAULT_BRANCH_PREFIX, UUID_LENGTH};
use crate::utils::clean_branch_name;
use prfiles_github::GitHubError;
use prfiles_github::consts::{DEFAULT_COMMIT_MESSAGE, DEFAULT_PR_BODY, DEFAULT_PR_TITLE};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Options for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrOptions {
    pub title: String,
    pub body: String,
    pub commit_msg: String,
    pub branch_name: Option<String>,
    pub base_branch: String,
    pub labels: Vec<String>,
    pub draft: bool,
}

impl PrOptions {
    pub fn new(base_branch: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_PR_TITLE.to_string(),
            body: DEFAULT_PR_BODY.to_string(),
            commit_msg: DEFAULT_COMMIT_MESSAGE.to_string(),
            branch_name: None,
            base_branch: base_branch.into(),
            labels: Vec::new(),
            draft: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_commit_message(mut self, commit_msg: impl Into<String>) -> Self {
        self.commit_msg = commit_msg.into();
        self
    }

    pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn as_draft(mut self) -> Self {
        self.draft = true;
        self
    }

    /// Sanitized branch name, generated when none was given or nothing
    /// survives sanitizing
    pub fn new_branch_name(&self) -> String {
        self.branch_name
            .as_deref()
            .map(clean_branch_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{}-{}",
                    DEFAULT_BRANCH_PREFIX,
                    &Uuid::new_v4().simple().to_string()[..UUID_LENGTH]
                )
            })
    }
}

/// A local file and the repository path it is committed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub destination: String,
    pub contents: String,
}

impl FileUpload {
    pub fn new(destination: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            contents: contents.into(),
        }
    }
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    CreateBranch,
    CreateBlob { destination: String },
    CreateTree,
    CreateCommit,
    UpdateReference,
    CreatePullRequest,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::CreateBranch => write!(f, "Creating branch"),
            PipelineStage::CreateBlob { destination } => {
                write!(f, "Uploading blob for {destination}")
            }
            PipelineStage::CreateTree => write!(f, "Creating tree"),
            PipelineStage::CreateCommit => write!(f, "Creating commit"),
            PipelineStage::UpdateReference => write!(f, "Updating branch reference"),
            PipelineStage::CreatePullRequest => write!(f, "Creating pull request"),
        }
    }
}

/// Why a pipeline run stopped
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No files to upload")]
    NoFiles,
    #[error("More than one file would be uploaded to '{0}'")]
    DuplicateDestination(String),
    #[error("{stage} failed: {reason}")]
    StageFailed { stage: PipelineStage, reason: String },
    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub branch: String,
    pub commit_sha: String,
    pub pull_number: String,
    pub pull_url: String,
    pub labels_applied: Vec<String>,
    /// Set when labels were requested but could not be applied
    pub label_warning: Option<String>,
}
