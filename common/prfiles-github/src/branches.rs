//! Branch and reference operations

use crate::client::Transport;
use crate::consts::REFERENCE_EXISTS_MESSAGE;
use crate::error::Result;
use crate::repo_actions::{ExistingBranchPolicy, RepoActions};
use crate::response::{RepoReturn, str_at};
use serde::Serialize;

#[derive(Serialize)]
struct RefPayload<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

impl<T: Transport> RepoActions<T> {
    /// Get a branch; `sha` is the SHA of its head commit
    // https://docs.github.com/en/rest/branches/branches#get-a-branch
    pub async fn get_branch(&self, branch_name: &str) -> Result<RepoReturn> {
        self.action("get_branch", format!("Requesting SHA of branch: {branch_name}"));
        let endpoint = self.endpoint(&format!("/branches/{branch_name}"));

        let result = self.transport.get(&endpoint).await?;

        Ok(RepoReturn {
            sha: str_at(&result, &["commit", "sha"]),
            url: str_at(&result, &["url"]),
            html_url: str_at(&result, &["html_url"]),
            full_return: result,
        })
    }

    /// Create `new_branch` pointing at the head of `base_branch`
    ///
    /// When GitHub reports that the branch already exists, the outcome follows
    /// the configured [`ExistingBranchPolicy`]. If `base_branch` cannot be
    /// resolved no ref is created and the base lookup is returned as-is.
    // https://docs.github.com/en/rest/git/refs#create-a-reference
    pub async fn create_branch(&self, base_branch: &str, new_branch: &str) -> Result<RepoReturn> {
        self.action(
            "create_branch",
            format!("Creating '{new_branch}' from '{base_branch}'"),
        );

        let base = self.get_branch(base_branch).await?;
        if !base.has_sha() {
            self.warn(format!(
                "Base branch '{base_branch}' has no SHA, not creating '{new_branch}'"
            ));
            return Ok(RepoReturn::from_full(base.full_return));
        }

        let endpoint = self.endpoint("/git/refs");
        let payload = serde_json::to_value(RefPayload {
            reference: format!("refs/heads/{new_branch}"),
            sha: &base.sha,
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        if str_at(&result, &["message"]) == REFERENCE_EXISTS_MESSAGE {
            return match self.branch_policy {
                ExistingBranchPolicy::Reuse => {
                    self.warn(format!("Branch '{new_branch}' already exists, reusing it"));
                    self.get_branch(new_branch).await
                }
                ExistingBranchPolicy::Fail => {
                    self.warn(format!("Branch '{new_branch}' already exists"));
                    Ok(RepoReturn::from_full(result))
                }
            };
        }

        Ok(RepoReturn {
            sha: str_at(&result, &["object", "sha"]),
            url: str_at(&result, &["object", "url"]),
            html_url: String::new(),
            full_return: result,
        })
    }

    /// Point `branch_name` at `commit_sha`
    // https://docs.github.com/en/rest/git/refs#update-a-reference
    pub async fn update_reference(
        &self,
        branch_name: &str,
        commit_sha: &str,
    ) -> Result<RepoReturn> {
        self.action(
            "update_reference",
            format!("Update branch {branch_name} to ref {commit_sha}"),
        );
        let endpoint = self.endpoint(&format!("/git/refs/heads/{branch_name}"));
        let payload = serde_json::to_value(RefPayload {
            reference: format!("refs/heads/{branch_name}"),
            sha: commit_sha,
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        Ok(RepoReturn {
            sha: str_at(&result, &["object", "sha"]),
            url: str_at(&result, &["object", "url"]),
            html_url: String::new(),
            full_return: result,
        })
    }
}
