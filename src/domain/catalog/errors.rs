//! Catalog validation errors.

use thiserror::Error;

/// Every structural problem found in a catalog, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("catalog has {} problem(s): {}", problems.len(), problems.join("; "))]
pub struct CatalogValidationError {
    pub problems: Vec<String>,
}

impl CatalogValidationError {
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }
}
