//! Error handling utilities for the soulcare application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Some conditions are deliberately *not* errors: malformed persisted data reads
//! as an empty collection, an empty journal submission is reported through a
//! toast, and blocked audio playback is ignored.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures when writing to the key-value store.
///
/// # Examples
///
/// ```
/// use soulcare::errors::StorageError;
///
/// let error = StorageError::QuotaExceeded {
///     key: "soulcare_moods_v1".to_string(),
///     needed: 6_000_000,
///     quota: 5_242_880,
/// };
///
/// assert!(format!("{}", error).contains("quota exceeded"));
/// assert!(format!("{}", error).contains("soulcare_moods_v1"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would grow the store beyond its quota.
    #[error("Storage quota exceeded while writing '{key}': {needed} bytes needed, quota is {quota} bytes. Export and clear old data to free space.")]
    QuotaExceeded {
        /// The key being written
        key: String,
        /// Total bytes the store would occupy after the write
        needed: usize,
        /// Configured quota in bytes
        quota: usize,
    },

    /// Records could not be encoded as JSON.
    #[error("Failed to serialize records for '{key}': {source}")]
    Serialization {
        /// The key being written
        key: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

/// Represents errors that can occur when locking the store file.
///
/// # Examples
///
/// ```
/// use soulcare::errors::LockError;
/// use std::path::PathBuf;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
/// let error = LockError::AcquisitionFailed {
///     path: PathBuf::from("/data/soulcare-storage.json.lock"),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("Failed to acquire lock"));
/// assert!(format!("{}", error).contains("permission denied"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Acquiring the lock failed for a technical reason.
    #[error("Failed to acquire lock for store file {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents failures when starting the meditation audio player.
///
/// These errors never reach the user during a meditation session: playback
/// failures are logged and ignored. They are surfaced by `AudioPlayer::play`
/// so callers and tests can tell what went wrong.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The player command could not be found.
    #[error("Audio player '{command}' not found: {source}. Please check that it is installed and available in your PATH.")]
    CommandNotFound {
        /// The player command
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Permission was denied when starting the player.
    #[error("Permission denied when trying to execute audio player '{command}': {source}")]
    PermissionDenied {
        /// The player command
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The player failed to start for another reason.
    #[error("Failed to execute audio player '{command}': {source}")]
    ExecutionFailed {
        /// The player command
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configured audio file does not exist.
    #[error("Audio file not found: {path}")]
    MissingFile {
        /// The missing file
        path: PathBuf,
    },
}

impl AudioError {
    /// Classifies a spawn failure by its I/O error kind.
    pub fn from_spawn(command: &str, source: io::Error) -> Self {
        let command = command.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => AudioError::CommandNotFound { command, source },
            io::ErrorKind::PermissionDenied => AudioError::PermissionDenied { command, source },
            _ => AudioError::ExecutionFailed { command, source },
        }
    }
}

/// Represents all possible errors that can occur in the soulcare application.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// ```
/// use soulcare::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors writing to the key-value store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors related to locking the store file.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors starting audio playback.
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Errors reading an export file back in.
    #[error("Import error: {0}")]
    Import(String),

    /// Errors in record input (e.g. an unknown mood with no emoji).
    #[error("Record error: {0}")]
    Record(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
