//! Error types for converter configuration and noise helpers.
//!
//! Table loading failures are not listed here: a converter absorbs them into identity mode.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for uc-convert operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A sample sequence is shorter than the requested element count.
    #[error("Sequence length mismatch: {what} has {len} elements, {count} requested")]
    LengthMismatch {
        what: &'static str,
        len: usize,
        count: usize,
    },
}
