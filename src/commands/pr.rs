//! Pull request command implementation

use super::{Command, CommandContext};
use crate::github::{PipelineOutcome, PrOptions, create_pr_from_files};
use crate::utils::load_upload;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use prfiles_github::{ExistingBranchPolicy, RepoActions};
use std::path::PathBuf;

/// Pull request command for committing local files to a new branch
pub struct PrCommand {
    pub files: Vec<PathBuf>,
    pub path_prefix: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub commit_msg: Option<String>,
    pub branch_name: Option<String>,
    pub labels: Vec<String>,
    pub draft: bool,
    pub reuse_branch: bool,
}

impl PrCommand {
    /// Pipeline options for this command on top of `base_branch`
    pub fn options(&self, base_branch: &str) -> PrOptions {
        let mut options = PrOptions::new(base_branch).with_labels(self.labels.clone());
        if let Some(title) = &self.title {
            options = options.with_title(title);
        }
        if let Some(body) = &self.body {
            options = options.with_body(body);
        }
        if let Some(message) = &self.commit_msg {
            options = options.with_commit_message(message);
        }
        if let Some(branch) = &self.branch_name {
            options = options.with_branch_name(branch);
        }
        if self.draft {
            options = options.as_draft();
        }
        options
    }

    fn branch_policy(&self) -> ExistingBranchPolicy {
        if self.reuse_branch {
            ExistingBranchPolicy::Reuse
        } else {
            ExistingBranchPolicy::Fail
        }
    }

    fn report(&self, outcome: &PipelineOutcome) {
        if let Some(warning) = &outcome.label_warning {
            println!("{}", warning.yellow());
        } else if !outcome.labels_applied.is_empty() {
            println!(
                "{} {}",
                "Labels applied:".green(),
                outcome.labels_applied.join(", ")
            );
        }

        println!(
            "{} | {} {}",
            outcome.branch.cyan().bold(),
            "Pull request created:".green(),
            outcome.pull_url
        );
    }
}

#[async_trait]
impl Command for PrCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let credentials = &context.config.credentials;
        let actions = RepoActions::connect_to(credentials, &context.api_url)?
            .with_branch_policy(self.branch_policy());

        // Read everything up front so a bad file never leaves a half-built branch
        let uploads = self
            .files
            .iter()
            .map(|path| load_upload(path, self.path_prefix.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        println!(
            "{}",
            format!(
                "Creating pull request in {}/{} with {} file(s)...",
                credentials.owner,
                credentials.repo,
                uploads.len()
            )
            .green()
        );

        let options = self.options(&context.config.base_branch);
        match create_pr_from_files(&actions, credentials, &options, &uploads).await {
            Ok(outcome) => {
                self.report(&outcome);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", format!("Error: {e}").red());
                Err(e.into())
            }
        }
    }
}
