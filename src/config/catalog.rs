//! Catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::catalog::FileCatalogSource;

/// Location of the packaged catalog bundle
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Path to a `.json`, `.yaml` or `.yml` bundle
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl CatalogConfig {
    pub fn source(&self) -> FileCatalogSource {
        FileCatalogSource::new(&self.path)
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("catalog.path"));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./web/static/data/skills-data.json")
}
