//! Core error types
//!
//! The pipeline itself never fails: every malformed annotation is handled
//! best-effort. Errors only arise when loading or validating configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written as TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but holds unusable values
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let error = ConfigError::Invalid {
            reason: "sentence_forward_limit must be at most 10000".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid configuration: sentence_forward_limit must be at most 10000"
        );
    }

    #[test]
    fn test_serialize_display() {
        use serde::ser::Error as _;

        let error = ConfigError::Serialize(toml::ser::Error::custom("unsupported value"));
        let message = error.to_string();
        assert!(message.starts_with("failed to serialize config"));
        assert!(message.contains("unsupported value"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let error = ConfigError::Io {
            path: PathBuf::from("missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let message = error.to_string();
        assert!(message.contains("missing.toml"));
        assert!(message.contains("no such file"));
    }
}
