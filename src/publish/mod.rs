//! Versioned snapshot persistence
//!
//! One base directory holds two kinds of record for a variable set:
//!
//! - `variables_latest.json` - the mutable record, overwritten on every
//!   publish.
//! - `variables_vNNN.json` - immutable version records, numbered from 001
//!   upward. The number is zero-padded to three digits so lexical order
//!   matches numeric order up to 999 versions.
//!
//! Publishing writes the version record and the latest record as two
//! independent writes. There is no rename and no rollback: if one write
//! fails after the other succeeded, the two records diverge and the error
//! is surfaced to the caller without retry.

mod errors;

pub use errors::{StorageError, StorageResult};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::store::Snapshot;

/// File name of the mutable latest record.
pub const LATEST_FILE: &str = "variables_latest.json";

/// Reads and writes versioned snapshots under one base directory.
///
/// The directory is an explicit constructor argument; it is created on the
/// first publish if absent.
#[derive(Debug, Clone)]
pub struct VersionStore {
    base_dir: PathBuf,
}

impl VersionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the latest record.
    pub fn latest_path(&self) -> PathBuf {
        self.base_dir.join(LATEST_FILE)
    }

    /// Path of one version record.
    pub fn version_path(&self, version: u32) -> PathBuf {
        self.base_dir.join(format!("variables_v{:03}.json", version))
    }

    /// Loads the latest record.
    ///
    /// A missing record (or base directory) is not an error: it loads as an
    /// empty snapshot.
    pub fn load_latest(&self) -> StorageResult<Snapshot> {
        let path = self.latest_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no latest record, starting empty");
                return Ok(Snapshot::default());
            }
            Err(e) => {
                return Err(StorageError::ReadFailure {
                    path,
                    reason: e.to_string(),
                })
            }
        };
        debug!(path = %path.display(), "loaded latest record");

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StorageError::ReadFailure {
                path: path.clone(),
                reason: format!("invalid JSON: {}", e),
            })?;
        Snapshot::from_json(&value).map_err(|e| StorageError::ReadFailure {
            path,
            reason: e.to_string(),
        })
    }

    /// First version number not yet taken by an existing record.
    ///
    /// Version records are assumed sequential from 1 with no gaps; the scan
    /// stops at the first unused number and deleted numbers are not reused.
    pub fn next_version(&self) -> u32 {
        let mut version = 1;
        while self.version_path(version).exists() {
            version += 1;
        }
        version
    }

    /// Published version numbers, ascending.
    pub fn versions(&self) -> Vec<u32> {
        (1..self.next_version()).collect()
    }

    /// Publishes a snapshot as the next version and overwrites the latest
    /// record with the same content. Returns the new version number.
    pub fn publish(&self, snapshot: &Snapshot) -> StorageResult<u32> {
        fs::create_dir_all(&self.base_dir).map_err(|e| StorageError::WriteFailure {
            path: self.base_dir.clone(),
            reason: e.to_string(),
        })?;

        let version = self.next_version();
        let version_path = self.version_path(version);
        let content = serde_json::to_string_pretty(&snapshot.to_json()).map_err(|e| {
            StorageError::WriteFailure {
                path: version_path.clone(),
                reason: e.to_string(),
            }
        })?;

        fs::write(&version_path, &content).map_err(|e| StorageError::WriteFailure {
            path: version_path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %version_path.display(), "wrote version record");

        let latest_path = self.latest_path();
        fs::write(&latest_path, &content).map_err(|e| StorageError::WriteFailure {
            path: latest_path.clone(),
            reason: e.to_string(),
        })?;

        info!(version, path = %latest_path.display(), "published snapshot");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::VarType;
    use crate::store::VariableStore;
    use std::fs;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut store = VariableStore::new();
        store.add_variable("speed", VarType::Float, "3.5").unwrap();
        store.add_variable("tint", VarType::Color, "255,0,0").unwrap();
        store.set_override("tint", "shot01", "0,0,0").unwrap();
        store.snapshot()
    }

    #[test]
    fn test_load_latest_fresh_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path().join("does_not_exist_yet"));
        let snapshot = store.load_latest().unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_publish_assigns_sequential_versions() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        let snapshot = sample_snapshot();

        assert_eq!(store.publish(&snapshot).unwrap(), 1);
        assert_eq!(store.publish(&snapshot).unwrap(), 2);
        assert_eq!(store.versions(), vec![1, 2]);
        assert!(store.version_path(1).exists());
        assert!(store.version_path(2).exists());
    }

    #[test]
    fn test_version_file_names_zero_padded() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        store.publish(&sample_snapshot()).unwrap();
        assert!(temp_dir.path().join("variables_v001.json").exists());
        assert!(temp_dir.path().join(LATEST_FILE).exists());
    }

    #[test]
    fn test_publish_leaves_earlier_versions_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());

        store.publish(&sample_snapshot()).unwrap();
        let v1_before = fs::read_to_string(store.version_path(1)).unwrap();

        let mut vars = VariableStore::from_snapshot(store.load_latest().unwrap());
        vars.update_default("speed", "9.9").unwrap();
        store.publish(&vars.snapshot()).unwrap();

        assert_eq!(fs::read_to_string(store.version_path(1)).unwrap(), v1_before);
        assert_ne!(
            fs::read_to_string(store.version_path(2)).unwrap(),
            v1_before
        );
    }

    #[test]
    fn test_latest_matches_newest_version() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        let version = store.publish(&sample_snapshot()).unwrap();

        let latest = fs::read_to_string(store.latest_path()).unwrap();
        let newest = fs::read_to_string(store.version_path(version)).unwrap();
        assert_eq!(latest, newest);
    }

    #[test]
    fn test_publish_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        let snapshot = sample_snapshot();

        store.publish(&snapshot).unwrap();
        assert_eq!(store.load_latest().unwrap(), snapshot);
    }

    #[test]
    fn test_malformed_latest_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        fs::write(store.latest_path(), "{ not json").unwrap();

        assert!(matches!(
            store.load_latest(),
            Err(StorageError::ReadFailure { .. })
        ));
    }

    #[test]
    fn test_next_version_skips_existing_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = VersionStore::new(temp_dir.path());
        fs::write(store.version_path(1), "{}").unwrap();
        fs::write(store.version_path(2), "{}").unwrap();
        assert_eq!(store.next_version(), 3);
    }
}
