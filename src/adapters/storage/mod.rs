//! Storage Adapters
//!
//! Implementations of the StateStore port for persisting assessment state.
//!
//! ## Available Adapters
//!
//! - **FileStateStore** - Stores each record as a JSON file on disk
//! - **InMemoryStateStore** - Stores records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStore, InMemoryStateStore};
//!
//! // Production: file-based storage
//! let store = FileStateStore::new("./data/state");
//!
//! // Testing: in-memory storage
//! let store = InMemoryStateStore::new();
//! ```

mod file_state_store;
mod in_memory_state_store;

pub use file_state_store::FileStateStore;
pub use in_memory_state_store::InMemoryStateStore;
