//! Core error types for deepwork-core.
//!
//! Most failures in this crate are absorbed at the public boundary of the
//! stores and the audio cue (logged, then replaced by defaults or no-ops).
//! These types describe what went wrong on the way there.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deepwork-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Audio cue errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Audio cue errors.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The cue asset does not exist
    #[error("Cue asset not found at {0}")]
    AssetMissing(PathBuf),

    /// The cue asset exists but could not be decoded
    #[error("Failed to decode cue asset {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// No output device is available
    #[error("No audio output device found")]
    NoDevice,

    /// Building or starting the output stream failed
    #[error("Audio stream error: {0}")]
    Stream(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
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
    fn rusqlite_errors_map_to_query_failed() {
        let err: DatabaseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, DatabaseError::QueryFailed(_)));
    }

    #[test]
    fn core_error_display_includes_source() {
        let err = CoreError::from(AudioError::AssetMissing(PathBuf::from("/nope.wav")));
        assert_eq!(err.to_string(), "Audio error: Cue asset not found at /nope.wav");
    }
}
