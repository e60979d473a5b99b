//! Error handling utilities for the selah application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Per-row CSV problems are not errors at this level: they are reported as data
//! in [`crate::import::ParseResult`] and [`crate::import::ImportReport`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when taking the import lock.
///
/// # Examples
///
/// ```
/// use selah::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::ImportBusy {
///     path: PathBuf::from("/data/devotionals.lock"),
/// };
///
/// assert!(format!("{}", error).contains("already running"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process holds the import lock.
    #[error("Another import is already running against this database (lock held at {path}). Wait for it to finish or check for existing selah processes.")]
    ImportBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire import lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use selah::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Devotional for 2026-02-12 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other selah instances.")]
    Pool(#[from] r2d2::Error),

    /// Requested record not found in database.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Errors reported by a [`crate::publish::Publisher`] for a single devotional.
///
/// These never abort an import; the coordinator records them against the row
/// and moves on.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The backing store failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The publisher refused the devotional.
    #[error("{0}")]
    Rejected(String),
}

/// Failures while interpreting one CSV row.
///
/// The `Display` output is the exact message shown to the user for the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row decoded into too few fields.
    #[error("Expected at least 5 columns, found {found}")]
    TooFewColumns {
        /// Number of fields actually decoded
        found: usize,
    },

    /// The date column is malformed or not a calendar date.
    #[error("Invalid date format \"{date}\" (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The raw date text
        date: String,
    },
}

/// Represents all possible errors that can occur in the selah application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use selah::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use selah::errors::AppError;
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
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in the import workflow itself (bad arguments, unusable input).
    #[error("Import error: {0}")]
    Import(String),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to the import lock.
    #[error("Import lock error: {0}")]
    Lock(#[from] LockError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use selah::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Import("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
