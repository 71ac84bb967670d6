//! Prfiles - Add local files to a GitHub repo on a fresh branch and open a pull request

pub mod commands;
pub mod config;
pub mod constants;
pub mod github;
pub mod logging;
pub mod prompts;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::{ResolvedConfig, Settings, SettingsBuilder};
pub use github::{PipelineError, PipelineOutcome, PrOptions};
