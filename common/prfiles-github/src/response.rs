//! Uniform response envelope for repo actions

use serde_json::Value;

/// Return values from repo actions
///
/// Every operation produces the same four fields regardless of which endpoint
/// was called; absent fields default to empty. An empty `sha` means the
/// operation did not yield identifiable state and is a hard stop for the
/// pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoReturn {
    /// Decoded response body
    pub full_return: Value,
    /// SHA of the object created or found (PR number for pull requests)
    pub sha: String,
    pub url: String,
    pub html_url: String,
}

impl RepoReturn {
    /// Envelope carrying only the raw response
    pub fn from_full(full_return: Value) -> Self {
        Self {
            full_return,
            ..Self::default()
        }
    }

    /// Whether the operation produced identifiable state
    pub fn has_sha(&self) -> bool {
        !self.sha.is_empty()
    }

    /// Best description of why an operation failed, taken from the response
    ///
    /// Prefers GitHub's `message`, then the transport's `error` sentinel.
    pub fn failure_reason(&self) -> Option<String> {
        ["message", "error"]
            .iter()
            .find_map(|key| {
                self.full_return
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|reason| !reason.is_empty())
            })
            .map(str::to_string)
    }
}

/// Look up a nested string field, defaulting to an empty string
///
/// ```rust
/// use prfiles_github::response::str_at;
/// use serde_json::json;
///
/// let value = json!({"commit": {"sha": "abc"}});
/// assert_eq!(str_at(&value, &["commit", "sha"]), "abc");
/// assert_eq!(str_at(&value, &["object", "sha"]), "");
/// ```
pub fn str_at(value: &Value, path: &[&str]) -> String {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
