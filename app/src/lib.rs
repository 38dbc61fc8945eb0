//! Bench Sales Application Layer
//!
//! Wires configuration, the board catalogue, search, scoring and storage into
//! a set of commands. The `bench-sales` binary is a thin clap front end over
//! [`commands`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod error;
pub mod state;

use bench_core::AppConfig;
use std::path::Path;

// Re-export commonly used types
pub use error::CommandError;
pub use state::AppState;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` switches everything to debug.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "info,bench=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration from `path` (or the default location), then apply
/// environment overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, CommandError> {
    let mut config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
