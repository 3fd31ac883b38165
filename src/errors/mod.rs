//! Error handling utilities for the daybook library.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the library, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when reading or writing the
/// entry archive on disk.
///
/// Each variant captures the path involved and, where applicable, the
/// underlying I/O error, so callers can report exactly which entry file an
/// operation failed on.
///
/// # Examples
///
/// ```
/// use daybook::errors::ArchiveError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let io_error = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
/// let error = ArchiveError::WriteFailed {
///     path: PathBuf::from("/journal/entries/1705329000000"),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("Failed to write"));
/// assert!(format!("{}", error).contains("1705329000000"));
/// ```
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Error when an entry file could not be written.
    #[error("Failed to write entry file {path}: {source}. Check free disk space and permissions on the journal directory.")]
    WriteFailed {
        /// The path of the entry file that could not be written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when an entry file could not be deleted.
    #[error("Failed to delete entry file {path}: {source}")]
    DeleteFailed {
        /// The path of the entry file that could not be deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when an entry record could not be serialized for storage.
    #[error("Failed to encode entry {key}: {source}")]
    EncodeFailed {
        /// The storage key of the entry
        key: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },
}

/// Represents specific error cases that can occur when persisting or loading
/// the search index.
///
/// Index failures are almost always recoverable: the index is a derived
/// artifact and can be rebuilt from the archive at any time. Callers usually
/// log these rather than propagate them.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Error when the index file could not be written.
    #[error("Failed to write search index {path}: {source}")]
    PersistFailed {
        /// The path of the index file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the index contents could not be serialized.
    #[error("Failed to encode search index: {0}")]
    EncodeFailed(#[source] serde_json::Error),
}

/// Represents all possible errors that can occur in the daybook library.
///
/// This enum is the central error type used across the crate, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error`
/// trait implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Missing journal directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing journal directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use daybook::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., rejecting an empty entry).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors when reading or writing the entry archive.
    ///
    /// This variant uses a dedicated ArchiveError type to provide detailed
    /// information about what went wrong with the on-disk archive.
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Errors when persisting or loading the search index.
    ///
    /// This variant uses a dedicated IndexError type to provide detailed
    /// information about what went wrong with the index file.
    #[error("Search index error: {0}")]
    Index(#[from] IndexError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the crate to represent operations
/// that may fail with an `AppError`.
pub type AppResult<T> = Result<T, AppError>;
