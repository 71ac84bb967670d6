//! Central constants for the prfiles application

/// Default values for Git operations
pub mod git {
    /// Base branch used when none is configured
    pub const FALLBACK_BRANCH: &str = "main";
}

/// Default values for GitHub operations
pub mod github {
    /// Default prefix for generated branch names
    pub const DEFAULT_BRANCH_PREFIX: &str = "prfiles";

    /// Length of UUID suffix used in branch names
    pub const UUID_LENGTH: usize = 6;

    /// Fallback token variable, checked after `GITHUB_AUTH_TOKEN`
    pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = ".prfiles.toml";
}
