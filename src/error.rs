//! Error types for diamond-viz operations.

use std::io;
use thiserror::Error;

use crate::api::ApiError;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in diamond-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, terminal, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Prediction API error.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., empty or inverted extent).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },
}
