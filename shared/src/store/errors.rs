//! Error types for the persistence side of the store.

use thiserror::Error;

/// Failures while writing the application state to a sink
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistError {
    #[error("Failed to serialize state: {message}")]
    Serialization { message: String },

    #[error("Failed to write state to {path}: {message}")]
    Io { path: String, message: String },

    #[error("Sink unavailable: {message}")]
    Unavailable { message: String },
}

/// Result type for sink operations
pub type PersistResult<T> = Result<T, PersistError>;

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PersistError {
    fn from(err: serde_yaml::Error) -> Self {
        PersistError::Serialization {
            message: err.to_string(),
        }
    }
}
