//! Error types and handling.

use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required bus field was left empty
    #[error("Validation error: {0}")]
    Validation(String),

    /// Roster file could not be written (locked, read-only, disk full)
    #[error("Could not save roster to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: RosterFileError,
    },

    /// Roster file exists but could not be read
    #[error("Could not read roster from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: RosterFileError,
    },

    /// Roster row could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Excel export error
    #[error("Export error: {0}")]
    Export(String),
}

/// Low-level failure reading or writing the roster file
#[derive(Error, Debug)]
pub enum RosterFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    XlsxRead(#[from] calamine::XlsxError),

    #[error(transparent)]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a parse error with message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether this error is a rejected form input rather than an I/O failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}
