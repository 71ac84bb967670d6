//! Configuration validation
//!
//! Every problem is collected so the user sees the full list at once instead
//! of fixing one flag per run.

use super::{SettingKey, Settings};
use thiserror::Error;

/// A single problem with the resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{} is required (use {} or the config file)", .0.label(), .0.flag())]
    Missing(SettingKey),
    #[error("Invalid value '{value}' for {}: {reason}", .key.label())]
    InvalidValue {
        key: SettingKey,
        value: String,
        reason: String,
    },
}

/// Check that every required value is present and usable
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors: Vec<ConfigValidationError> = SettingKey::REQUIRED
        .into_iter()
        .filter(|key| settings.get(*key).is_none())
        .map(ConfigValidationError::Missing)
        .collect();

    if let Some(email) = settings.get(SettingKey::UserEmail)
        && !email.contains('@')
    {
        errors.push(ConfigValidationError::InvalidValue {
            key: SettingKey::UserEmail,
            value: email.to_string(),
            reason: "must be an email address".to_string(),
        });
    }

    for key in [SettingKey::OwnerName, SettingKey::RepoName] {
        if let Some(value) = settings.get(key)
            && value.contains('/')
        {
            errors.push(ConfigValidationError::InvalidValue {
                key,
                value: value.to_string(),
                reason: "must not contain '/'".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fold a list of validation errors into one `anyhow::Error`
pub fn validation_errors_to_anyhow(errors: Vec<ConfigValidationError>) -> anyhow::Error {
    let lines: Vec<String> = errors.iter().map(|error| format!("  - {error}")).collect();
    anyhow::anyhow!("Invalid configuration:\n{}", lines.join("\n"))
}
