//! Error types for the spreadsheet engine

use thiserror::Error;

pub use tallysheet_formula::FormulaFormatError;

/// Result type for spreadsheet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Spreadsheet`](crate::Spreadsheet) operations
///
/// Every variant leaves the sheet exactly as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Name fails the variable grammar or the validator
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Formula content could not be parsed
    #[error("Invalid formula: {0}")]
    FormulaFormat(#[from] FormulaFormatError),

    /// The edit would make a cell depend on itself
    #[error("Circular reference through cell {0}")]
    CircularReference(String),

    /// Saving or loading failed
    #[error(transparent)]
    ReadWrite(#[from] ReadWriteError),
}

impl From<tallysheet_core::Error> for Error {
    fn from(err: tallysheet_core::Error) -> Self {
        match err {
            tallysheet_core::Error::InvalidName(name) => Error::InvalidName(name),
        }
    }
}

/// Errors from reading or writing a saved sheet
#[derive(Debug, Error)]
pub enum ReadWriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed sheet document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected '{expected}', found '{found}'")]
    VersionMismatch { expected: String, found: String },

    /// A saved cell failed to replay
    #[error("Cannot restore cell {name}: {source}")]
    InvalidCell {
        name: String,
        #[source]
        source: Box<Error>,
    },
}
