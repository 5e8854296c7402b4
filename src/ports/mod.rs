//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `StateStore` - Durable record of the assessment session
//! - `CatalogSource` - Supplier of the validated skill catalog

mod catalog_source;
mod state_store;

pub use catalog_source::{CatalogError, CatalogSource};
pub use state_store::{StateStore, StateStoreError};
