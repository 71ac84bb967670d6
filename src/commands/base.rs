//! Base types and traits for the command pattern

use crate::config::ResolvedConfig;
use anyhow::Result;
use prfiles_github::consts::API_BASE;

/// Context passed to all commands containing shared configuration and options
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// The resolved configuration
    pub config: ResolvedConfig,
    /// Root of the GitHub REST API
    pub api_url: String,
}

impl CommandContext {
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            api_url: API_BASE.to_string(),
        }
    }

    /// Talk to another API root (GitHub Enterprise, test servers)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
