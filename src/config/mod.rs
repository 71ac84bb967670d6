//! Configuration management module

pub mod builder;
pub mod loader;
pub mod validation;

pub use builder::{EnvSettings, ResolvedConfig, SettingsBuilder};
pub use loader::{SettingKey, Settings};
pub use validation::{ConfigValidationError, validate_settings};
