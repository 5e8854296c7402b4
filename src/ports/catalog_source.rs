//! Catalog Source Port - Interface for obtaining the skill catalog.
//!
//! Implementations parse the packaged data and must only return catalogs
//! that pass `Catalog::validate`.

use crate::domain::catalog::{Catalog, CatalogValidationError};

/// Errors that can occur while loading a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] CatalogValidationError),
}

/// Port for loading a validated catalog
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalog
    ///
    /// # Errors
    /// Returns `CatalogError` if the data cannot be read, parsed or validated
    fn load_catalog(&self) -> Result<Catalog, CatalogError>;
}
