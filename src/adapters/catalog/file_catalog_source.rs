//! File-based Catalog Source Adapter
//!
//! Reads the packaged catalog bundle from disk. The format follows the
//! file extension: `.json` for the generated bundle, `.yaml`/`.yml` for
//! hand-maintained catalogs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::catalog::Catalog;
use crate::ports::{CatalogError, CatalogSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(CatalogError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            })),
        }
    }
}

/// Loads and validates a catalog from a single file
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        let format = CatalogFormat::from_path(&self.path)?;
        let text = fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let catalog: Catalog = match format {
            CatalogFormat::Json => {
                serde_json::from_str(&text).map_err(|e| CatalogError::Parse(e.to_string()))?
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(&text).map_err(|e| CatalogError::Parse(e.to_string()))?
            }
        };

        catalog.validate()?;

        tracing::info!(
            path = %self.path.display(),
            skills = catalog.skills.len(),
            roles = catalog.roles.len(),
            rules = catalog.inference_rules.len(),
            fingerprint = %catalog.fingerprint(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
