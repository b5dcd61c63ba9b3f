//! File-backed snapshot store
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go through a temporary
//! file and a rename so a crash never leaves a half-written snapshot.

use super::{SnapshotStore, StoreError};
use async_trait::async_trait;
use directories::ProjectDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform data directory
    pub fn for_platform() -> Result<Self, StoreError> {
        Self::platform_dir()
            .map(Self::new)
            .ok_or(StoreError::NoStorageDir)
    }

    /// Platform data directory shared with the log file
    pub fn platform_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "enroll", "enroll-tui").map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        let write_err = |path: &Path, source| StoreError::Write {
            key: key.to_string(),
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| write_err(&self.dir, e))?;
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| write_err(&tmp_path, e))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| write_err(&path, e))?;
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }
}
