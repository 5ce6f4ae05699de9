//! Core error types for zenflow-core.
//!
//! None of these are fatal to the engines. Storage reads and quote fetches
//! recover with defaults before an error ever reaches a caller; what is left
//! surfaces from explicit user commands (bad task id, unwritable config).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zenflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A task or note id that does not exist
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty text where content is required
    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
