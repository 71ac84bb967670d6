//! Constants shared by the GitHub client

use std::time::Duration;

/// GitHub API base URL
pub const API_BASE: &str = "https://api.github.com";

/// Accept header sent with every request
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variable holding the personal access token
pub const TOKEN_ENV: &str = "GITHUB_AUTH_TOKEN";

/// Environment variable holding the GitHub login used as User-Agent
pub const USER_NAME_ENV: &str = "GITHUB_USER_NAME";

/// File mode for regular (non-executable) files in a tree
pub const BLOB_FILE_MODE: &str = "100644";

/// GitHub's message when a ref being created is already present
pub const REFERENCE_EXISTS_MESSAGE: &str = "Reference already exists";

/// Default commit message
pub const DEFAULT_COMMIT_MESSAGE: &str = "Auto commit";

/// Default pull request title
pub const DEFAULT_PR_TITLE: &str = "Auto PR";

/// Default pull request body
pub const DEFAULT_PR_BODY: &str = "PR Auto Generated";
