//! Command argument validation
//!
//! Checks run after clap parsing and before any file is read or request
//! made.

use crate::utils::clean_branch_name;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// A rejected command line argument
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Invalid value '{value}' for {argument}: {reason}")]
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    #[error("{argument} cannot be empty")]
    EmptyCollection { argument: String },
    #[error("{argument} '{value}' given more than once")]
    Duplicate { argument: String, value: String },
}

fn invalid(argument: &str, value: impl Into<String>, reason: impl Into<String>) -> anyhow::Error {
    ArgumentError::InvalidValue {
        argument: argument.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
    .into()
}

/// At least one file, each an existing regular file, none repeated
pub fn validate_files(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Err(ArgumentError::EmptyCollection {
            argument: "files".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for file in files {
        if !file.is_file() {
            return Err(invalid("file", file.display().to_string(), "file not found"));
        }
        if !seen.insert(file) {
            return Err(ArgumentError::Duplicate {
                argument: "file".to_string(),
                value: file.display().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

pub fn validate_labels(labels: &[String]) -> Result<()> {
    match labels.iter().find(|label| label.trim().is_empty()) {
        Some(label) => Err(invalid(
            "label",
            label.as_str(),
            "label cannot be empty or whitespace only",
        )),
        None => Ok(()),
    }
}

/// Something must survive sanitizing, and git rejects names starting with `-`
pub fn validate_branch_name(branch: &Option<String>) -> Result<()> {
    let Some(name) = branch else {
        return Ok(());
    };

    let cleaned = clean_branch_name(name);
    if cleaned.is_empty() {
        return Err(invalid(
            "branch",
            name.as_str(),
            "nothing left after removing invalid characters",
        ));
    }
    if cleaned.starts_with('-') {
        return Err(invalid("branch", name.as_str(), "branch names cannot start with '-'"));
    }
    Ok(())
}

/// Free text (title, body, commit message) must not be blank when given
pub fn validate_text(argument: &str, value: &Option<String>) -> Result<()> {
    if let Some(text) = value
        && text.trim().is_empty()
    {
        return Err(invalid(
            argument,
            text.as_str(),
            format!("{argument} cannot be empty or whitespace only"),
        ));
    }
    Ok(())
}
