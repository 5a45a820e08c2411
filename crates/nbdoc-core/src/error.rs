//! Error types for nbdoc-core.

use std::path::PathBuf;

/// Result type for nbdoc operations.
pub type NbdocResult<T> = Result<T, NbdocError>;

/// Errors that can occur while converting notebooks.
#[derive(Debug, thiserror::Error)]
pub enum NbdocError {
    /// Failed to read the input notebook.
    #[error("Failed to read file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// Failed to write an output file.
    #[error("Failed to write file {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    /// Notebook JSON is malformed or has the wrong shape.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Notebook is structurally unusable for the requested operation.
    #[error("Invalid notebook: {0}")]
    InvalidNotebook(String),

    /// External formatter could not be run.
    #[error("Formatter error: {0}")]
    Formatter(String),
}

impl NbdocError {
    pub(crate) fn read(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::ReadError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::WriteError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
