//! GitHub pipeline driver
//!
//! The REST calls themselves live in the `prfiles-github` crate. This module
//! chains them into one run:
//!
//! - [`api`]: [`create_pr_from_files`], branch to labels in one call
//! - [`types`]: options, uploads, outcome and error types
//!
//! ```rust,no_run
//! use prfiles::github::{FileUpload, PrOptions, create_pr_from_files};
//! use prfiles_github::{Credentials, RepoActions};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::new("octo", "hello", "octocat", "octo@example.com", "token");
//! let actions = RepoActions::connect(&credentials)?;
//! let files = vec![FileUpload::new("docs/notes.md", "# Notes\n")];
//!
//! let outcome =
//!     create_pr_from_files(&actions, &credentials, &PrOptions::new("main"), &files).await?;
//! println!("{}", outcome.pull_url);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod types;

// Re-export commonly used items for convenience
pub use api::create_pr_from_files;
pub use types::{FileUpload, PipelineError, PipelineOutcome, PipelineStage, PrOptions};
