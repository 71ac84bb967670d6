//! Authentication and credential handling

use crate::consts::{TOKEN_ENV, USER_NAME_ENV};
use crate::error::{GitHubError, Result};

/// Token and login used to authenticate every request
#[derive(Clone)]
pub struct GitHubAuth {
    pub username: String,
    pub token: String,
}

impl GitHubAuth {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Read `GITHUB_USER_NAME` and `GITHUB_AUTH_TOKEN` from the environment
    ///
    /// # Errors
    /// Returns [`GitHubError::MissingCredentials`] naming every variable that
    /// is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GitHubAuth::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = read(TOKEN_ENV);
        let username = read(USER_NAME_ENV);

        let mut missing = Vec::new();
        if token.is_none() {
            missing.push(format!("{TOKEN_ENV} environment variable"));
        }
        if username.is_none() {
            missing.push(format!("{USER_NAME_ENV} environment variable"));
        }

        match (username, token) {
            (Some(username), Some(token)) => Ok(Self { username, token }),
            _ => Err(GitHubError::MissingCredentials(missing)),
        }
    }

    /// Value for the `Authorization` header
    pub fn get_auth_header(&self) -> String {
        format!("token {}", self.token)
    }
}

impl std::fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuth")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

/// Everything needed to commit to a repository and open a pull request
///
/// Supplied once and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Owner of the repo (`github.com/[OWNER]/[REPO]`)
    pub owner: String,
    /// Name of the repo (`github.com/[OWNER]/[REPO]`)
    pub repo: String,
    /// GitHub login, also used as commit author name
    pub user_name: String,
    /// Commit author email
    pub user_email: String,
    /// Personal access token
    pub token: String,
}

impl Credentials {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            token: token.into(),
        }
    }

    /// Check that every field is usable before any network call is made
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("owner name", &self.owner),
            ("repo name", &self.repo),
            ("user name", &self.user_name),
            ("user email", &self.user_email),
            ("auth token", &self.token),
        ] {
            if value.trim().is_empty() {
                missing.push(name.to_string());
            }
        }

        if !self.user_email.trim().is_empty() && !self.user_email.contains('@') {
            missing.push(format!("valid user email (got '{}')", self.user_email));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GitHubError::MissingCredentials(missing))
        }
    }

    /// Transport authentication derived from these credentials
    pub fn auth(&self) -> GitHubAuth {
        GitHubAuth::new(&self.user_name, &self.token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .field("token", &"***")
            .finish()
    }
}
