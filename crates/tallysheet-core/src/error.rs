//! Error types for tallysheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tallysheet-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Name fails the variable grammar or the caller-supplied validator
    #[error("Invalid name: {0}")]
    InvalidName(String),
}
