//! State storage configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ValidationError;
use crate::adapters::storage::{FileStateStore, InMemoryStateStore};
use crate::application::engine::DEFAULT_STORAGE_KEY;
use crate::ports::StateStore;

/// Where assessment state is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding one JSON file per key (file backend only)
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Key the assessment record is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl StorageConfig {
    /// Build the configured state store
    pub fn build_store(&self) -> Arc<dyn StateStore> {
        match self.backend {
            StorageBackend::File => Arc::new(FileStateStore::new(&self.directory)),
            StorageBackend::Memory => Arc::new(InMemoryStateStore::new()),
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("storage.key"));
        }
        if self.backend == StorageBackend::File && self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.directory"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            key: default_key(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data/state")
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
