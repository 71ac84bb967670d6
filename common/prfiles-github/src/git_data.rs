//! Git data operations: blobs, trees and commits

use crate::client::Transport;
use crate::consts::BLOB_FILE_MODE;
use crate::error::Result;
use crate::repo_actions::RepoActions;
use crate::response::{RepoReturn, str_at};
use serde::Serialize;

/// A blob SHA and the path it should appear at in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub sha: String,
    pub path: String,
}

impl BlobRef {
    pub fn new(sha: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            path: path.into(),
        }
    }
}

#[derive(Serialize)]
struct BlobPayload<'a> {
    owner: &'a str,
    repo: &'a str,
    content: &'a str,
    encoding: &'static str,
}

#[derive(Serialize)]
struct TreeEntry<'a> {
    path: &'a str,
    mode: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    sha: &'a str,
}

#[derive(Serialize)]
struct TreePayload<'a> {
    base_tree: &'a str,
    owner: &'a str,
    repo: &'a str,
    tree: Vec<TreeEntry<'a>>,
}

#[derive(Serialize)]
struct CommitAuthor<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct CommitPayload<'a> {
    message: &'a str,
    author: CommitAuthor<'a>,
    parents: [&'a str; 1],
    tree: &'a str,
}

impl<T: Transport> RepoActions<T> {
    /// Create a UTF-8 blob of `file_contents`
    // https://docs.github.com/en/rest/git/blobs#create-a-blob
    pub async fn create_blob(&self, file_contents: &str) -> Result<RepoReturn> {
        self.action(
            "create_blob",
            format!("Creating blob of {} bytes", file_contents.len()),
        );
        let endpoint = self.endpoint("/git/blobs");
        let payload = serde_json::to_value(BlobPayload {
            owner: &self.owner,
            repo: &self.repo,
            content: file_contents,
            encoding: "utf-8",
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        Ok(RepoReturn {
            sha: str_at(&result, &["sha"]),
            url: str_at(&result, &["url"]),
            html_url: String::new(),
            full_return: result,
        })
    }

    /// Link blobs into a tree on top of `branch_sha`
    ///
    /// One tree entry is emitted per blob, in the order given, each as a
    /// regular file.
    // https://docs.github.com/en/rest/git/trees#create-a-tree
    pub async fn create_blob_tree(
        &self,
        branch_sha: &str,
        blobs: &[BlobRef],
    ) -> Result<RepoReturn> {
        self.action(
            "create_blob_tree",
            format!("Creating tree of {} blob(s) on {branch_sha}", blobs.len()),
        );
        let endpoint = self.endpoint("/git/trees");
        let payload = serde_json::to_value(TreePayload {
            base_tree: branch_sha,
            owner: &self.owner,
            repo: &self.repo,
            tree: blobs
                .iter()
                .map(|blob| TreeEntry {
                    path: &blob.path,
                    mode: BLOB_FILE_MODE,
                    kind: "blob",
                    sha: &blob.sha,
                })
                .collect(),
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        Ok(RepoReturn {
            sha: str_at(&result, &["sha"]),
            url: str_at(&result, &["url"]),
            html_url: String::new(),
            full_return: result,
        })
    }

    /// Create a commit of `tree_sha` whose single parent is `branch_sha`
    // https://docs.github.com/en/rest/git/commits#create-a-commit
    pub async fn create_commit(
        &self,
        author_name: &str,
        author_email: &str,
        branch_sha: &str,
        tree_sha: &str,
        message: &str,
    ) -> Result<RepoReturn> {
        self.action(
            "create_commit",
            format!("Create commit of {tree_sha} to {branch_sha}"),
        );
        let endpoint = self.endpoint("/git/commits");
        let payload = serde_json::to_value(CommitPayload {
            message,
            author: CommitAuthor {
                name: author_name,
                email: author_email,
            },
            parents: [branch_sha],
            tree: tree_sha,
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        Ok(RepoReturn {
            sha: str_at(&result, &["sha"]),
            url: str_at(&result, &["url"]),
            html_url: str_at(&result, &["html_url"]),
            full_return: result,
        })
    }
}
