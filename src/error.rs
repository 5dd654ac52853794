//! Application error types

use std::io;

use console_core::ConfigError;
use thiserror::Error;

/// Errors from the host application
#[derive(Error, Debug)]
pub enum AppError {
    /// An event script line could not be understood
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Snapshot serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;
