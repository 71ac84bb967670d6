//! Configuration file loading and saving

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single configurable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    OwnerName,
    RepoName,
    UserName,
    UserEmail,
    UserToken,
    BaseBranch,
}

impl SettingKey {
    /// Values that must be known before any request is made
    pub const REQUIRED: [SettingKey; 5] = [
        SettingKey::OwnerName,
        SettingKey::RepoName,
        SettingKey::UserName,
        SettingKey::UserEmail,
        SettingKey::UserToken,
    ];

    /// Human-readable name, also used as the prompt text
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::OwnerName => "Repo owner name",
            SettingKey::RepoName => "Repo name",
            SettingKey::UserName => "GitHub user name",
            SettingKey::UserEmail => "GitHub user email",
            SettingKey::UserToken => "GitHub auth token",
            SettingKey::BaseBranch => "Base branch",
        }
    }

    /// Command line flag that sets the value
    pub fn flag(self) -> &'static str {
        match self {
            SettingKey::OwnerName => "--owner-name",
            SettingKey::RepoName => "--repo-name",
            SettingKey::UserName => "--user-name",
            SettingKey::UserEmail => "--user-email",
            SettingKey::UserToken => "--auth-token",
            SettingKey::BaseBranch => "--base-branch",
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, SettingKey::UserToken)
    }
}

/// Values persisted between runs
///
/// Every field is optional; whatever is missing is filled from flags, the
/// environment or a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file; a missing file yields empty settings
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save settings to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Write a config file with no values, replacing any existing one
    pub fn create_empty(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, "")
            .with_context(|| format!("Failed to create config file {}", path.display()))
    }

    /// Value of `key`, treating blank strings as unset
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        let value = match key {
            SettingKey::OwnerName => &self.owner_name,
            SettingKey::RepoName => &self.repo_name,
            SettingKey::UserName => &self.user_name,
            SettingKey::UserEmail => &self.user_email,
            SettingKey::UserToken => &self.user_token,
            SettingKey::BaseBranch => &self.base_branch,
        };
        value.as_deref().filter(|value| !value.trim().is_empty())
    }

    fn slot_mut(&mut self, key: SettingKey) -> &mut Option<String> {
        match key {
            SettingKey::OwnerName => &mut self.owner_name,
            SettingKey::RepoName => &mut self.repo_name,
            SettingKey::UserName => &mut self.user_name,
            SettingKey::UserEmail => &mut self.user_email,
            SettingKey::UserToken => &mut self.user_token,
            SettingKey::BaseBranch => &mut self.base_branch,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    pub fn clear(&mut self, key: SettingKey) {
        *self.slot_mut(key) = None;
    }

    /// Fill every unset value of `self` from `lower`
    pub fn fill_from(mut self, lower: &Settings) -> Self {
        for key in SettingKey::REQUIRED
            .into_iter()
            .chain([SettingKey::BaseBranch])
        {
            if self.get(key).is_none()
                && let Some(value) = lower.get(key)
            {
                self.set(key, value);
            }
        }
        self
    }
}
