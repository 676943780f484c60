use std::fs;
use std::path::{Path, PathBuf};

use super::backend::KeyValueStore;
use crate::error::StorageError;

/// Directory-backed key-value store, one `<key>.json` file per key
#[derive(Clone, Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_path`; the directory is created on first write
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Get the base directory path
    pub fn base_dir(&self) -> &Path {
        &self.base_path
    }

    /// Resolve the file holding `key`, rejecting keys that could escape the base directory
    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = key.is_empty()
            || key == "."
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\');
        if invalid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.base_path)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            log::debug!("Removed storage slot {:?}", path);
        }
        Ok(())
    }
}
