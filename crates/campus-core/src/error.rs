//! Core error type.
//!
//! Downstream crates wrap `CoreError` as one variant of their own enums.

use thiserror::Error;

/// Errors produced by `campus-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `campus-core`.
pub type CoreResult<T> = Result<T, CoreError>;
