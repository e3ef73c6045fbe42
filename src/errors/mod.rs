//! Error handling utilities for the daybook application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the entry parser and the in-memory journal store.
///
/// # Examples
///
/// ```
/// use daybook::errors::JournalError;
///
/// let error = JournalError::NotFound("no entries found with the tag".to_string());
/// assert!(format!("{}", error).contains("with the tag"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    /// The entry text was blank once the date expression was consumed.
    #[error("Entry is empty. Write some text after the date, e.g. `today Went for a run.`")]
    EmptyEntry,

    /// A removal or lookup was scoped at a resolution that cannot select whole periods.
    #[error("Invalid date scope '{0}'. Use YYYY-MM-DD, YYYY-MM, YYYY, today, yesterday or a weekday, without a time")]
    InvalidRemovalScope(String),

    /// A range bound did not parse as a plain `YYYY-MM-DD` date.
    #[error("Cannot parse {bound} date '{value}'. Expected format: YYYY-MM-DD")]
    InvalidRange {
        /// Which bound failed, `start` or `end`
        bound: &'static str,
        /// The raw value supplied by the caller
        value: String,
    },

    /// A well-formed query matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// The persisted payload could not be decoded.
    #[error("Cannot read journal: {0}. Is it encrypted?")]
    CorruptStore(String),

    /// The journal only accepts one entry per calendar day and that day is taken.
    #[error("An entry already exists for {0}")]
    DuplicateDay(String),
}

/// A `@key=value` fragment that could not be split into exactly one key and value.
///
/// This is a warning rather than an error: the entry is still created, the
/// fragment is removed from its content and nothing is stored for it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("field '{fragment}' provided in a wrong format, expected @key=value")]
pub struct MalformedField {
    /// The fragment text following the `@`, trimmed
    pub fragment: String,
}

/// Errors related to the password and cipher wrapper around the journal payload.
///
/// Failures while *opening* an encrypted payload are reported as
/// [`JournalError::CorruptStore`], since a wrong password and a damaged file are
/// indistinguishable.
///
/// ```
/// use daybook::errors::CryptoError;
///
/// let message = format!("{}", CryptoError::PassphraseMismatch);
/// assert!(message.contains("don't match"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The two passwords typed when enabling encryption differ.
    #[error("The two passwords don't match. Nothing was saved.")]
    PassphraseMismatch,

    /// An empty password was supplied.
    #[error("Password cannot be empty")]
    EmptyPassphrase,

    /// Reading the password from the terminal failed.
    #[error("Cannot read password: {0}")]
    PassphrasePrompt(String),

    /// Sealing the payload failed.
    #[error("Encryption failed: {0}")]
    Seal(String),
}

/// Represents errors that can occur when attempting to lock the journal file.
///
/// ```
/// use daybook::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/journal.json"),
/// };
///
/// assert!(format!("{}", error).contains("in use"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the file is already locked by another process.
    #[error("Journal file is in use by another daybook process: {path}. Wait for it to finish and try again.")]
    FileBusy {
        /// The path to the file that is locked
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock for journal file {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the daybook application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Journal directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Journal directory path is empty");
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
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from parsing entries or querying the journal.
    #[error("{0}")]
    Journal(#[from] JournalError),

    /// Errors related to file locking.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to passwords and encryption.
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// The newest-release lookup failed.
    #[error("Cannot fetch the newest version: {0}")]
    Update(String),
}

impl AppError {
    /// True when the error only reports an empty query result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Journal(JournalError::NotFound(_)))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// ```
/// use daybook::errors::{AppError, AppResult, JournalError};
///
/// fn might_fail(text: &str) -> AppResult<&str> {
///     if text.trim().is_empty() {
///         return Err(JournalError::EmptyEntry.into());
///     }
///     Ok(text)
/// }
///
/// assert!(might_fail("  ").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;
