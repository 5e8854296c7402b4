//! In-Memory State Store Adapter
//!
//! Keeps serialized records in memory. Records go through the same JSON
//! encoding as the file store, so round-trip behaviour matches.
//! Useful for testing and development.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::assessment::AssessmentState;
use crate::ports::{StateStore, StateStoreError};

/// In-memory storage for assessment state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    records: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStateStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw record, bypassing serialization (useful for tests)
    pub fn put_raw(&self, key: impl Into<String>, record: impl Into<String>) {
        self.records.write().insert(key.into(), record.into());
    }

    /// Get the raw record stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.read().get(key).cloned()
    }
}

impl StateStore for InMemoryStateStore {
    fn save(&self, key: &str, state: &AssessmentState) -> Result<(), StateStoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;
        self.records.write().insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<AssessmentState, StateStoreError> {
        let records = self.records.read();
        let json = records
            .get(key)
            .ok_or_else(|| StateStoreError::NotFound(key.to_string()))?;
        serde_json::from_str(json)
            .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))
    }

    fn exists(&self, key: &str) -> Result<bool, StateStoreError> {
        Ok(self.records.read().contains_key(key))
    }

    fn delete(&self, key: &str) -> Result<(), StateStoreError> {
        self.records.write().remove(key);
        Ok(())
    }
}
