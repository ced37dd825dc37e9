//! Top-level error type for the engine.
//!
//! # Design Decisions
//! - Fatal errors (config, regex compilation, I/O, task failure) propagate
//!   to `main` and end the process with exit code 1
//! - "Pattern does not match URL" is a normal negative result, not an error
//! - No retries anywhere in the system

use std::path::PathBuf;

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Errors that abort the whole run. No partial results are produced.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("regex compilation failed for pattern `{pattern}`: {source}")]
    RegexCompile {
        pattern: String,
        source: regex::Error,
    },

    #[error("could not open URL file {path}: {source}")]
    UrlFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
