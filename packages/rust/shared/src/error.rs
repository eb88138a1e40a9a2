//! Error types for partsite.
//!
//! Library crates use [`PartsiteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all partsite operations.
#[derive(Debug, thiserror::Error)]
pub enum PartsiteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// CSV ingestion error (unreadable file, broken structure).
    #[error("ingest error: {message}")]
    Ingest { message: String },

    /// Template rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, empty output, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PartsiteError>;

impl PartsiteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an ingest error from any displayable message.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PartsiteError::config("missing base_url");
        assert_eq!(err.to_string(), "config error: missing base_url");

        let err = PartsiteError::ingest("no such column: price");
        assert!(err.to_string().contains("no such column"));
    }
}
