//! Utility modules for common functionality

pub mod filesystem;
pub mod sanitizers;

// Re-export commonly used functions
pub use filesystem::{destination_path, load_upload};
pub use sanitizers::{clean_branch_name, clean_file_name};
