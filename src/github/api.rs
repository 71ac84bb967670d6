//! The file-to-pull-request pipeline

use super::types::{FileUpload, PipelineError, PipelineOutcome, PipelineStage, PrOptions};
use prfiles_github::{BlobRef, Credentials, PullRequestParams, RepoActions, RepoReturn, Transport};
use std::collections::HashSet;
use tracing::{info, warn};

/// Stop unless the stage produced a SHA
fn require(stage: PipelineStage, result: RepoReturn) -> Result<RepoReturn, PipelineError> {
    if result.has_sha() {
        return Ok(result);
    }
    let reason = result
        .failure_reason()
        .unwrap_or_else(|| "response carried no SHA".to_string());
    Err(PipelineError::StageFailed { stage, reason })
}

/// Fail on the first destination shared by two uploads
fn ensure_unique_destinations(files: &[FileUpload]) -> Result<(), PipelineError> {
    let mut seen = HashSet::new();
    match files.iter().find(|file| !seen.insert(file.destination.as_str())) {
        Some(file) => Err(PipelineError::DuplicateDestination(file.destination.clone())),
        None => Ok(()),
    }
}

/// Commit `files` to a new branch and open a pull request for it
///
/// The stages run strictly in order:
/// 1. Create the branch from `options.base_branch`
/// 2. Upload one blob per file, in the order given
/// 3. Build a tree on top of the branch head
/// 4. Commit the tree as `credentials.user_name`
/// 5. Point the branch at the commit
/// 6. Open the pull request
/// 7. Apply labels
///
/// Uploads sharing a destination are rejected before any request. The run
/// stops at the first stage that yields no SHA. Nothing already
/// created is rolled back. Labels are best effort: a failure there is
/// recorded on the outcome instead of failing the run.
pub async fn create_pr_from_files<T: Transport>(
    actions: &RepoActions<T>,
    credentials: &Credentials,
    options: &PrOptions,
    files: &[FileUpload],
) -> Result<PipelineOutcome, PipelineError> {
    if files.is_empty() {
        return Err(PipelineError::NoFiles);
    }
    ensure_unique_destinations(files)?;

    let branch_name = options.new_branch_name();
    info!(
        "Creating branch '{branch_name}' from '{}' in {}/{}",
        options.base_branch,
        actions.owner(),
        actions.repo()
    );
    let branch = require(
        PipelineStage::CreateBranch,
        actions
            .create_branch(&options.base_branch, &branch_name)
            .await?,
    )?;

    let mut blobs = Vec::with_capacity(files.len());
    for file in files {
        let blob = require(
            PipelineStage::CreateBlob {
                destination: file.destination.clone(),
            },
            actions.create_blob(&file.contents).await?,
        )?;
        blobs.push(BlobRef::new(blob.sha, &file.destination));
    }
    info!("Uploaded {} blob(s)", blobs.len());

    let tree = require(
        PipelineStage::CreateTree,
        actions.create_blob_tree(&branch.sha, &blobs).await?,
    )?;

    let commit = require(
        PipelineStage::CreateCommit,
        actions
            .create_commit(
                &credentials.user_name,
                &credentials.user_email,
                &branch.sha,
                &tree.sha,
                &options.commit_msg,
            )
            .await?,
    )?;

    require(
        PipelineStage::UpdateReference,
        actions.update_reference(&branch_name, &commit.sha).await?,
    )?;
    info!("Branch '{branch_name}' now points at {}", commit.sha);

    let params = PullRequestParams::new(&branch_name, &options.base_branch)
        .with_title(&options.title)
        .with_body(&options.body)
        .as_draft(options.draft);
    let pull = require(
        PipelineStage::CreatePullRequest,
        actions.create_pull_request(params).await?,
    )?;

    let (labels_applied, label_warning) = apply_labels(actions, &pull.sha, &options.labels).await;

    Ok(PipelineOutcome {
        branch: branch_name,
        commit_sha: commit.sha,
        pull_number: pull.sha,
        pull_url: pull.html_url,
        labels_applied,
        label_warning,
    })
}

async fn apply_labels<T: Transport>(
    actions: &RepoActions<T>,
    number: &str,
    labels: &[String],
) -> (Vec<String>, Option<String>) {
    if labels.is_empty() {
        return (Vec::new(), None);
    }

    let failure = match actions.add_labels(number, labels).await {
        Ok(result) if result.full_return.is_array() => return (labels.to_vec(), None),
        Ok(result) => result
            .failure_reason()
            .unwrap_or_else(|| "unexpected response".to_string()),
        Err(e) => e.to_string(),
    };

    let message = format!("Labels not applied to #{number}: {failure}");
    warn!("{message}");
    (Vec::new(), Some(message))
}
