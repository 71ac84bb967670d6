//! Interactive prompts for configuration values that were not supplied

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use std::io::IsTerminal;

/// Source of answers for missing configuration values
pub trait Prompter {
    /// Ask for `field`; `secret` hides the input
    fn ask(&self, field: &str, secret: bool) -> Result<String>;
}

/// Terminal prompter backed by dialoguer
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Only usable when stdin is a terminal
    pub fn is_available() -> bool {
        std::io::stdin().is_terminal()
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, field: &str, secret: bool) -> Result<String> {
        if secret {
            Password::with_theme(&self.theme)
                .with_prompt(field)
                .interact()
                .with_context(|| format!("Failed to read {field} from input"))
        } else {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(field)
                .interact_text()
                .with_context(|| format!("Failed to read {field} from input"))
        }
    }
}
