//! Error types for flat-file storage.

use std::path::PathBuf;

use staffdesk_core::error::StaffdeskError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Content documents must be JSON objects.
    #[error("content must be a JSON object")]
    NotAnObject,

    /// A dotted path whose array index is out of range.
    #[error("invalid field path: {0}")]
    InvalidPath(String),

    #[error("{0} does not hold a JSON array")]
    Corrupt(PathBuf),

    #[error("storage lock poisoned: {0}")]
    Lock(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StorageError::Json {
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for StaffdeskError {
    fn from(err: StorageError) -> Self {
        StaffdeskError::Storage(err.to_string())
    }
}
