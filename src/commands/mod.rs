//! Command implementations

pub mod base;
pub mod pr;
pub mod validators;

pub use base::{Command, CommandContext};
pub use pr::PrCommand;
