//! Error types for the serie sentinel tracker.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, mutating or reconciling sentinel files
#[derive(Debug, Error)]
pub enum SerieError {
    #[error("Invalid namespace name {name:?}: {reason}")]
    NamespaceName { name: String, reason: String },

    #[error("Can't understand [{0}]")]
    SelectorParse(String),

    #[error("Filesystem error on {path:?}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SerieError {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SerieError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for SerieError {
    fn from(err: config::ConfigError) -> Self {
        SerieError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for SerieError {
    fn from(err: serde_json::Error) -> Self {
        SerieError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SerieError>;
