//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Catalog loading from packaged JSON/YAML bundles
//! - `storage` - Assessment state persistence (file, in-memory)

pub mod catalog;
pub mod storage;

pub use catalog::FileCatalogSource;
pub use storage::{FileStateStore, InMemoryStateStore};
