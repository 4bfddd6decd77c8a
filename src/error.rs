//! Error types for Image Manager.

use thiserror::Error;

/// Common error type for Image Manager.
#[derive(Error, Debug)]
pub enum ImageManagerError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input or configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Image Manager operations.
pub type Result<T> = std::result::Result<T, ImageManagerError>;
