//! Core error types for studybuddy-core.
//!
//! The pure planning functions (urgency, clashes, next class, context) never
//! fail. Errors only come from the collaborators around them: the record
//! store, the configuration file and the chat model.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studybuddy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chat model errors
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be resolved or created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

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

/// Chat model errors.
#[derive(Error, Debug)]
pub enum ChatError {
    /// No API key in the environment or the keyring
    #[error("No API key configured; set STUDYBUDDY_OPENAI_API_KEY or run `studybuddy-cli auth set-key`")]
    MissingApiKey,

    /// Keyring access failed
    #[error("Credential store error: {0}")]
    Credentials(#[from] keyring::Error),

    /// Transport-level failure
    #[error("Request to chat model failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Chat model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The endpoint answered with something we cannot read
    #[error("Malformed chat model response: {0}")]
    MalformedResponse(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field is empty
    #[error("Field '{0}' must not be empty")]
    Empty(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked
                    || code.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_errors_become_query_failures() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn core_error_wraps_database_error() {
        let err: CoreError = rusqlite::Error::InvalidQuery.into();
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn missing_key_message_names_the_fix() {
        let msg = ChatError::MissingApiKey.to_string();
        assert!(msg.contains("auth set-key"));
    }
}
