//! Durable key-value store backed by sled

use super::KeyValueStore;
use crate::error::{Result, TeachAssistError};
use directories::ProjectDirs;
use sled::Db;
use std::path::{Path, PathBuf};

/// [`KeyValueStore`] persisted in an embedded `sled` database
///
/// Every write is flushed before returning so a crash after `set` never
/// loses a saved draft.
pub struct SledStore {
    db: Db,
    path: PathBuf,
}

impl SledStore {
    /// Open the store in the default location
    ///
    /// `TEACHASSIST_STORE_PATH` overrides the location; otherwise the store
    /// lives in the platform data directory.
    pub fn open_default() -> Result<Self> {
        if let Ok(override_path) = std::env::var("TEACHASSIST_STORE_PATH") {
            return Self::open(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "teachassist", "teachassist").ok_or_else(|| {
            TeachAssistError::Storage("Could not determine data directory".into())
        })?;

        Self::open(proj_dirs.data_dir().join("store"))
    }

    /// Open or create a store at `path`
    ///
    /// # Errors
    ///
    /// Returns `TeachAssistError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use teachassist::storage::{KeyValueStore, SledStore};
    ///
    /// # fn main() -> teachassist::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let store = SledStore::open(dir.path().join("store"))?;
    /// store.set("greeting", "hello")?;
    /// assert_eq!(store.get("greeting")?, Some("hello".to_string()));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TeachAssistError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(&path)
            .map_err(|e| TeachAssistError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!("Opened store at {}", path.display());
        Ok(Self { db, path })
    }

    /// Location of the database directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| TeachAssistError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    TeachAssistError::Storage(format!("Value for {} is not UTF-8: {}", key, e))
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| TeachAssistError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| TeachAssistError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| TeachAssistError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| TeachAssistError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
