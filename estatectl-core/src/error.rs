/// Structured error types for estatectl-core.
///
/// The engine itself never fails on well-formed input; these errors cover the
/// boundary where documents, seed files and config are read.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for estatectl-core operations
#[derive(Error, Debug)]
pub enum EstateError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// A document could not be mapped onto its record type
    #[error("Malformed {collection} document at index {index}: {reason}")]
    Document {
        collection: &'static str,
        index: usize,
        reason: String,
    },

    /// File or directory not found
    #[error("Path not found: {path:?}")]
    PathNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for estatectl-core operations
pub type Result<T> = std::result::Result<T, EstateError>;

impl EstateError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a document mapping error
    pub fn document(collection: &'static str, index: usize, reason: impl Into<String>) -> Self {
        Self::Document {
            collection,
            index,
            reason: reason.into(),
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
