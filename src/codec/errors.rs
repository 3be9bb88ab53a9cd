//! Value codec error types

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced while parsing or decoding typed values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("invalid boolean: {0:?} (expected 'true' or 'false')")]
    InvalidBoolean(String),

    #[error("invalid color: {0:?} (expected three integers separated by commas)")]
    InvalidColor(String),

    #[error("color component {0} out of range (each component must be in 0-255)")]
    ColorComponentOutOfRange(i64),

    #[error("invalid vector: {0:?} (expected three numbers separated by commas)")]
    InvalidVector(String),
}
