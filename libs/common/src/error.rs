//! Custom error types for the common library
//!
//! This module defines the error types shared by the flat-file store and the
//! notification seam.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading or writing a document
    #[error("Store I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document exists but does not have the expected shape
    #[error("Corrupt document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned when a notification could not be delivered.
///
/// Callers log it and carry on; it never aborts the operation that triggered
/// the notification.
#[derive(Error, Debug)]
#[error("Notification to {recipient} failed: {reason}")]
pub struct NotifyError {
    pub recipient: String,
    pub reason: String,
}

/// Type alias for Result with NotifyError
pub type NotifyResult<T> = Result<T, NotifyError>;
