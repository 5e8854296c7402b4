//! State Store Port - Interface for persisting assessment state.
//!
//! The whole `AssessmentState` is stored as one record under a fixed key.
//! Implementations are synchronous: the engine treats a save as complete
//! when the call returns.

use crate::domain::assessment::AssessmentState;

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("No state stored under key: {0}")]
    NotFound(String),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading assessment state
pub trait StateStore: Send + Sync {
    /// Save the full state under `key`, replacing any previous record
    ///
    /// # Errors
    /// Returns `StateStoreError` if serialization or the write fails
    fn save(&self, key: &str, state: &AssessmentState) -> Result<(), StateStoreError>;

    /// Load the state stored under `key`
    ///
    /// # Errors
    /// - `StateStoreError::NotFound` if no record exists
    /// - `StateStoreError::DeserializationFailed` if the record is malformed
    fn load(&self, key: &str) -> Result<AssessmentState, StateStoreError>;

    /// Check if a record exists under `key`
    fn exists(&self, key: &str) -> Result<bool, StateStoreError>;

    /// Remove the record under `key`. Removing a missing record is not an error.
    fn delete(&self, key: &str) -> Result<(), StateStoreError>;
}
