//! Variable store error types

use thiserror::Error;

use crate::codec::CodecError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by variable and override mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("variable name cannot be empty")]
    EmptyName,

    #[error("variable '{0}' already exists")]
    DuplicateName(String),

    #[error("variable '{0}' not found")]
    UnknownVariable(String),

    #[error("no override for shot '{shot}' on variable '{variable}'")]
    UnknownOverride { variable: String, shot: String },

    #[error("shot id cannot be empty")]
    EmptyShotId,

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
