//! API error types

use std::string::FromUtf8Error;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Text is empty or only whitespace
    #[error("text is empty")]
    EmptyText,

    /// Text exceeds the configured ceiling
    #[error("text is {len} characters long; the limit is {max}")]
    TextTooLong {
        /// Length of the rejected text in chars
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream reply holds no usable annotation payload
    #[error("invalid analysis payload: {0}")]
    Payload(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl From<marginalia_core::ConfigError> for ApiError {
    fn from(error: marginalia_core::ConfigError) -> Self {
        ApiError::Config(error.to_string())
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
