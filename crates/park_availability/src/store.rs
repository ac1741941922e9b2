use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::types::Snapshot;

/// Default file name for the persisted snapshot
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "availability.json";

/// Directory, relative to the working directory, that holds the snapshot file
pub const DATA_DIR: &str = "data";

/// Errors raised while reading or writing the snapshot file
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The snapshot file exists but does not hold a valid snapshot
    #[error("Corrupt snapshot file {path}: {source}")]
    Corrupt {
        /// Snapshot file
        path: PathBuf,
        /// Underlying decode error
        source: serde_json::Error,
    },
}

/// File-backed store for the last known availability snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `<base_dir>/data/<filename>`
    pub fn in_data_dir(base_dir: impl AsRef<Path>, filename: &str) -> Self {
        Self::new(base_dir.as_ref().join(DATA_DIR).join(filename))
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory holding the snapshot file if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })
    }

    /// Load the previous snapshot. Returns `None` when no snapshot has been saved yet.
    pub async fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No previous snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        log::debug!(
            "Loaded snapshot with {} dates from {}",
            snapshot.len(),
            self.path.display()
        );

        Ok(Some(snapshot))
    }

    /// Replace the stored snapshot
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_vec(snapshot).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        log::info!(
            "💾 Saved snapshot with {} dates to {}",
            snapshot.len(),
            self.path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AvailabilityEntry, build_snapshot};

    fn sample_snapshot() -> Snapshot {
        build_snapshot(vec![
            AvailabilityEntry::new("2024-01-01", "partial", vec!["80007838".to_string()]),
            AvailabilityEntry::new("2024-01-02", "full", vec![]),
        ])
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("availability.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_data_dir(dir.path(), DEFAULT_SNAPSHOT_FILENAME);

        store.ensure_dir().await.unwrap();
        store.save(&sample_snapshot()).await.unwrap();

        assert_eq!(
            store.path(),
            dir.path().join("data").join("availability.json").as_path()
        );
        assert_eq!(store.load().await.unwrap(), Some(sample_snapshot()));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("availability.json"));

        store.save(&sample_snapshot()).await.unwrap();
        let replacement = build_snapshot(vec![AvailabilityEntry::new(
            "2024-02-01",
            "none",
            vec![],
        )]);
        store.save(&replacement).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, replacement);
        assert!(!loaded.contains_key("2024-01-01"));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("availability.json");
        std::fs::write(&path, "{\"2024-01-01\": {\"date\": ").unwrap();

        let result = SnapshotStore::new(path.clone()).load().await;

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_data_dir(dir.path(), "custom.json");

        store.ensure_dir().await.unwrap();
        store.ensure_dir().await.unwrap();

        assert!(dir.path().join("data").is_dir());
    }
}
