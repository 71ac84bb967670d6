//! Pull request and label operations

use crate::client::Transport;
use crate::consts::{DEFAULT_PR_BODY, DEFAULT_PR_TITLE};
use crate::error::Result;
use crate::repo_actions::RepoActions;
use crate::response::{RepoReturn, str_at};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::Value;

/// Parameters for creating a pull request
#[derive(Debug, Clone)]
pub struct PullRequestParams<'a> {
    pub head: &'a str,
    pub base: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub draft: bool,
}

impl<'a> PullRequestParams<'a> {
    /// Merge `head` into `base` with the default title and body
    pub fn new(head: &'a str, base: &'a str) -> Self {
        Self {
            head,
            base,
            title: DEFAULT_PR_TITLE,
            body: DEFAULT_PR_BODY,
            draft: false,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn with_body(mut self, body: &'a str) -> Self {
        self.body = body;
        self
    }

    pub fn as_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }
}

#[derive(Serialize)]
struct CreatePullRequestPayload<'a> {
    owner: &'a str,
    repo: &'a str,
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
    maintainer_can_modify: bool,
    draft: bool,
}

#[derive(Serialize)]
struct LabelsPayload<'a> {
    labels: &'a [String],
}

/// An open pull request found by head branch
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequestMatch {
    pub number: u64,
    pub url: String,
    pub html_url: String,
    pub full_return: Value,
}

/// Result of looking up a pull request by head branch
#[derive(Debug, Clone, PartialEq)]
pub enum PullRequestLookup {
    /// No pull request uses the branch (or the listing was unusable)
    NotFound,
    /// Exactly one pull request uses the branch
    Found(PullRequestMatch),
    /// More than one pull request uses the branch
    Ambiguous(usize),
}

impl PullRequestLookup {
    pub fn number(&self) -> Option<u64> {
        match self {
            PullRequestLookup::Found(found) => Some(found.number),
            _ => None,
        }
    }
}

impl<T: Transport> RepoActions<T> {
    /// Create a pull request of `params.head` merging into `params.base`
    ///
    /// `sha` of the result holds the pull request number. When GitHub does not
    /// return a number (typically because a pull request for the branch is
    /// already open) the existing one is looked up by head branch; the lookup
    /// only counts when exactly one pull request matches.
    // https://docs.github.com/en/rest/pulls/pulls#create-a-pull-request
    pub async fn create_pull_request(&self, params: PullRequestParams<'_>) -> Result<RepoReturn> {
        self.action(
            "create_pull_request",
            format!("Create pull request of {} to {}", params.head, params.base),
        );
        let endpoint = self.endpoint("/pulls");
        let payload = serde_json::to_value(CreatePullRequestPayload {
            owner: &self.owner,
            repo: &self.repo,
            title: params.title,
            head: params.head,
            base: params.base,
            body: params.body,
            maintainer_can_modify: true,
            draft: params.draft,
        })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        if let Some(number) = result.get("number").and_then(Value::as_u64) {
            return Ok(RepoReturn {
                sha: number.to_string(),
                url: str_at(&result, &["url"]),
                html_url: str_at(&result, &["html_url"]),
                full_return: result,
            });
        }

        if let Some(reason) = RepoReturn::from_full(result.clone()).failure_reason() {
            self.warn(format!(
                "Pull request for '{}' not created: {reason}",
                params.head
            ));
        }

        match self.find_pull_request(params.head).await? {
            PullRequestLookup::Found(found) => Ok(RepoReturn {
                sha: found.number.to_string(),
                url: found.url,
                html_url: found.html_url,
                full_return: found.full_return,
            }),
            _ => Ok(RepoReturn::from_full(result)),
        }
    }

    /// Look up the pull request whose head is `head_branch`
    // https://docs.github.com/en/rest/pulls/pulls#list-pull-requests
    pub async fn find_pull_request(&self, head_branch: &str) -> Result<PullRequestLookup> {
        self.action(
            "find_pull_request",
            format!("Looking up pull request for head '{head_branch}'"),
        );
        let head = format!("{}:{}", self.owner, head_branch);
        let endpoint = self.endpoint(&format!(
            "/pulls?head={}",
            utf8_percent_encode(&head, NON_ALPHANUMERIC)
        ));

        let result = self.transport.get(&endpoint).await?;

        let Some(pulls) = result.as_array() else {
            self.warn(format!("Unable to list pull requests for '{head_branch}'"));
            return Ok(PullRequestLookup::NotFound);
        };

        match pulls.as_slice() {
            [] => Ok(PullRequestLookup::NotFound),
            [pull] => match pull.get("number").and_then(Value::as_u64) {
                Some(number) => Ok(PullRequestLookup::Found(PullRequestMatch {
                    number,
                    url: str_at(pull, &["url"]),
                    html_url: str_at(pull, &["html_url"]),
                    full_return: pull.clone(),
                })),
                None => Ok(PullRequestLookup::NotFound),
            },
            many => {
                self.warn(format!(
                    "Unable to find exact PR for '{head_branch}': {} matches",
                    many.len()
                ));
                Ok(PullRequestLookup::Ambiguous(many.len()))
            }
        }
    }

    /// Number of the single pull request using `head_branch`, if there is
    /// exactly one
    pub async fn recover_pull_request(&self, head_branch: &str) -> Result<Option<u64>> {
        Ok(self.find_pull_request(head_branch).await?.number())
    }

    /// Add labels to an existing pull request; no request is made for an
    /// empty list
    // https://docs.github.com/en/rest/issues/labels#add-labels-to-an-issue
    pub async fn add_labels(&self, number: &str, labels: &[String]) -> Result<RepoReturn> {
        if labels.is_empty() {
            return Ok(RepoReturn::default());
        }

        self.action("add_labels", format!("Add labels {labels:?} to #{number}"));
        let endpoint = self.endpoint(&format!("/issues/{number}/labels"));
        let payload = serde_json::to_value(LabelsPayload { labels })?;

        let result = self.transport.post(&endpoint, &payload).await?;

        Ok(RepoReturn::from_full(result))
    }
}
