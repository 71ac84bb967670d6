//! Layered configuration resolution
//!
//! Precedence, highest first: command line flags, environment variables, the
//! saved config file, an interactive prompt, then built-in defaults.

use super::validation::{validate_settings, validation_errors_to_anyhow};
use super::{SettingKey, Settings};
use crate::constants;
use crate::prompts::Prompter;
use anyhow::Result;
use prfiles_github::Credentials;
use prfiles_github::consts::{TOKEN_ENV, USER_NAME_ENV};

/// Values taken from environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub token: Option<String>,
    pub user_name: Option<String>,
}

impl EnvSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `GITHUB_AUTH_TOKEN` wins over `GITHUB_TOKEN`; blank values are ignored
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            token: read(TOKEN_ENV).or_else(|| read(constants::github::FALLBACK_TOKEN_ENV)),
            user_name: read(USER_NAME_ENV),
        }
    }

    fn as_settings(&self) -> Settings {
        Settings {
            user_token: self.token.clone(),
            user_name: self.user_name.clone(),
            ..Settings::default()
        }
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub credentials: Credentials,
    pub base_branch: String,
}

impl ResolvedConfig {
    /// The values worth persisting for the next run
    pub fn to_settings(&self) -> Settings {
        Settings {
            owner_name: Some(self.credentials.owner.clone()),
            repo_name: Some(self.credentials.repo.clone()),
            user_name: Some(self.credentials.user_name.clone()),
            user_email: Some(self.credentials.user_email.clone()),
            user_token: Some(self.credentials.token.clone()),
            base_branch: Some(self.base_branch.clone()),
        }
    }
}

/// Builder combining every configuration source
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    cli: Settings,
    env: EnvSettings,
    file: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values given as command line flags
    pub fn with_cli(mut self, cli: Settings) -> Self {
        self.cli = cli;
        self
    }

    /// Values read from the environment
    pub fn with_env(mut self, env: EnvSettings) -> Self {
        self.env = env;
        self
    }

    /// Values loaded from the config file
    pub fn with_file(mut self, file: Settings) -> Self {
        self.file = file;
        self
    }

    /// Merge flags, environment and file without prompting or defaults
    pub fn layered(&self) -> Settings {
        self.cli
            .clone()
            .fill_from(&self.env.as_settings())
            .fill_from(&self.file)
    }

    /// What to write back to the config file after `resolved`
    ///
    /// Values that only came from the environment are not persisted; the
    /// file keeps whatever it held for them before.
    pub fn settings_to_save(&self, resolved: &ResolvedConfig) -> Settings {
        let mut settings = resolved.to_settings();
        let env = self.env.as_settings();
        for key in [SettingKey::UserToken, SettingKey::UserName] {
            if env.get(key).is_some() && self.cli.get(key).is_none() {
                match self.file.get(key) {
                    Some(saved) => settings.set(key, saved),
                    None => settings.clear(key),
                }
            }
        }
        settings
    }

    /// Resolve the configuration
    ///
    /// With a prompter, each required value still missing after layering is
    /// asked for once; without one, missing values go straight to validation,
    /// which reports all of them together.
    pub fn resolve(&self, prompter: Option<&dyn Prompter>) -> Result<ResolvedConfig> {
        let mut settings = self.layered();

        if let Some(prompter) = prompter {
            for key in SettingKey::REQUIRED {
                if settings.get(key).is_none() {
                    let answer = prompter.ask(key.label(), key.is_secret())?;
                    settings.set(key, answer.trim());
                }
            }
        }

        validate_settings(&settings).map_err(validation_errors_to_anyhow)?;

        let value = |key: SettingKey| settings.get(key).unwrap_or_default().trim().to_string();
        let base_branch = settings
            .get(SettingKey::BaseBranch)
            .map(|branch| branch.trim().to_string())
            .unwrap_or_else(|| constants::git::FALLBACK_BRANCH.to_string());

        Ok(ResolvedConfig {
            credentials: Credentials::new(
                value(SettingKey::OwnerName),
                value(SettingKey::RepoName),
                value(SettingKey::UserName),
                value(SettingKey::UserEmail),
                value(SettingKey::UserToken),
            ),
            base_branch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct ScriptedPrompter {
        answers: HashMap<&'static str, &'static str>,
        asked: RefCell<Vec<(String, bool)>>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[(&'static str, &'static str)]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&self, field: &str, secret: bool) -> Result<String> {
            self.asked.borrow_mut().push((field.to_string(), secret));
            Ok(self.answers.get(field).copied().unwrap_or_default().to_string())
        }
    }

    fn file_settings() -> Settings {
        Settings {
            owner_name: Some("file-owner".to_string()),
            repo_name: Some("file-repo".to_string()),
            user_name: Some("file-user".to_string()),
            user_email: Some("file@example.com".to_string()),
            user_token: Some("file-token".to_string()),
            base_branch: None,
        }
    }

    #[test]
    fn test_env_token_precedence() {
        let env = EnvSettings::from_lookup(|key| match key {
            "GITHUB_AUTH_TOKEN" => Some("auth".to_string()),
            "GITHUB_TOKEN" => Some("fallback".to_string()),
            _ => None,
        });
        assert_eq!(env.token.as_deref(), Some("auth"));
        assert_eq!(env.user_name, None);

        let env = EnvSettings::from_lookup(|key| match key {
            "GITHUB_AUTH_TOKEN" => Some(" ".to_string()),
            "GITHUB_TOKEN" => Some("fallback".to_string()),
            "GITHUB_USER_NAME" => Some("octocat".to_string()),
            _ => None,
        });
        assert_eq!(env.token.as_deref(), Some("fallback"));
        assert_eq!(env.user_name.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_layer_precedence() {
        let mut cli = Settings::default();
        cli.set(SettingKey::RepoName, "cli-repo");

        let env = EnvSettings {
            token: Some("env-token".to_string()),
            user_name: None,
        };

        let resolved = SettingsBuilder::new()
            .with_cli(cli)
            .with_env(env)
            .with_file(file_settings())
            .resolve(None)
            .unwrap();

        assert_eq!(resolved.credentials.repo, "cli-repo");
        assert_eq!(resolved.credentials.token, "env-token");
        assert_eq!(resolved.credentials.owner, "file-owner");
        assert_eq!(resolved.credentials.user_name, "file-user");
        assert_eq!(resolved.base_branch, "main");
    }

    #[test]
    fn test_prompts_only_for_missing_values() {
        let mut file = file_settings();
        file.user_token = None;
        file.user_email = None;
        let prompter = ScriptedPrompter::new(&[
            ("GitHub auth token", "prompted-token"),
            ("GitHub user email", " prompted@example.com "),
        ]);

        let resolved = SettingsBuilder::new()
            .with_file(file)
            .resolve(Some(&prompter))
            .unwrap();

        assert_eq!(resolved.credentials.token, "prompted-token");
        assert_eq!(resolved.credentials.user_email, "prompted@example.com");
        assert_eq!(
            prompter.asked.borrow().as_slice(),
            &[
                ("GitHub user email".to_string(), false),
                ("GitHub auth token".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_missing_values_without_prompter() {
        let err = SettingsBuilder::new().resolve(None).unwrap_err();
        let message = err.to_string();
        for key in SettingKey::REQUIRED {
            assert!(message.contains(key.flag()), "missing {} in {message}", key.flag());
        }
    }

    #[test]
    fn test_blank_prompt_answer_still_fails() {
        let mut file = file_settings();
        file.owner_name = None;
        let prompter = ScriptedPrompter::new(&[]);

        let err = SettingsBuilder::new()
            .with_file(file)
            .resolve(Some(&prompter))
            .unwrap_err();

        assert!(err.to_string().contains("--owner-name"));
    }

    #[test]
    fn test_resolved_round_trips_to_settings() {
        let mut file = file_settings();
        file.base_branch = Some("develop".to_string());

        let resolved = SettingsBuilder::new().with_file(file.clone()).resolve(None).unwrap();

        assert_eq!(resolved.base_branch, "develop");
        assert_eq!(resolved.to_settings(), file);
    }

    #[test]
    fn test_env_values_are_not_saved() {
        let mut file = file_settings();
        file.user_token = None;
        let builder = SettingsBuilder::new()
            .with_env(EnvSettings {
                token: Some("env-token".to_string()),
                user_name: Some("env-user".to_string()),
            })
            .with_file(file);

        let resolved = builder.resolve(None).unwrap();
        assert_eq!(resolved.credentials.token, "env-token");
        assert_eq!(resolved.credentials.user_name, "env-user");

        let saved = builder.settings_to_save(&resolved);
        assert_eq!(saved.user_token, None);
        assert_eq!(saved.get(SettingKey::UserName), Some("file-user"));
        assert_eq!(saved.get(SettingKey::OwnerName), Some("file-owner"));
    }

    #[test]
    fn test_flag_and_prompted_values_are_saved() {
        let mut cli = Settings::default();
        cli.set(SettingKey::UserToken, "cli-token");
        let mut file = file_settings();
        file.user_email = None;
        let prompter = ScriptedPrompter::new(&[("GitHub user email", "prompted@example.com")]);

        let builder = SettingsBuilder::new()
            .with_cli(cli)
            .with_env(EnvSettings {
                token: Some("env-token".to_string()),
                user_name: None,
            })
            .with_file(file);
        let resolved = builder.resolve(Some(&prompter)).unwrap();

        let saved = builder.settings_to_save(&resolved);
        assert_eq!(saved.get(SettingKey::UserToken), Some("cli-token"));
        assert_eq!(saved.get(SettingKey::UserEmail), Some("prompted@example.com"));
    }
}
