//! Logging initialization for the prfiles CLI
//!
//! Diagnostics go through `tracing` to stderr; user-facing output (the PR
//! URL, stage failures) is printed separately with `colored`.
//!
//! ```bash
//! # Default: warnings and GitHub error responses only
//! prfiles notes.md
//!
//! # Every API call with timing and payload sizes
//! prfiles --debug notes.md
//! RUST_LOG=prfiles_github=debug prfiles notes.md
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directives used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "prfiles=debug,prfiles_github=debug,reqwest=warn"
    } else {
        "prfiles=warn,prfiles_github=warn,reqwest=error"
    }
}

/// Initialize the logging subsystem
///
/// `RUST_LOG` takes precedence over the `--debug` flag. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(debug: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
