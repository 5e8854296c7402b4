//! File-based State Store Adapter
//!
//! Stores each assessment record as a pretty-printed JSON file named after
//! its key. Writes go to a sibling temp file first and are renamed into
//! place, so a failed write leaves the last complete record intact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::assessment::AssessmentState;
use crate::ports::{StateStore, StateStoreError};

/// File-based storage for assessment state
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    /// Create a new file store rooted at a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStateStore::new("./data/state");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the record file path for a key
    fn record_path(&self, key: &str) -> Result<PathBuf, StateStoreError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\']);
        if !valid {
            return Err(StateStoreError::IoError(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }

    fn temp_path(path: &Path) -> PathBuf {
        path.with_extension("json.tmp")
    }
}

impl StateStore for FileStateStore {
    fn save(&self, key: &str, state: &AssessmentState) -> Result<(), StateStoreError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.base_path)
            .map_err(|e| StateStoreError::IoError(e.to_string()))?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;

        let temp = Self::temp_path(&path);
        fs::write(&temp, json).map_err(|e| StateStoreError::IoError(e.to_string()))?;
        fs::rename(&temp, &path).map_err(|e| StateStoreError::IoError(e.to_string()))?;

        tracing::trace!(path = %path.display(), "assessment state written");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<AssessmentState, StateStoreError> {
        let path = self.record_path(key)?;
        if !path.exists() {
            return Err(StateStoreError::NotFound(key.to_string()));
        }

        let json =
            fs::read_to_string(&path).map_err(|e| StateStoreError::IoError(e.to_string()))?;

        serde_json::from_str(&json)
            .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, StateStoreError> {
        Ok(self.record_path(key)?.exists())
    }

    fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        let path = self.record_path(key)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StateStoreError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}
