//! Storage error types for versioned persistence

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File-level failures while loading or publishing snapshots.
///
/// A malformed or undecodable latest record surfaces as a read failure; a
/// missing one does not (it loads as an empty snapshot).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {reason}", .path.display())]
    ReadFailure { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },
}
