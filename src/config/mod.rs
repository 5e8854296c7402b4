//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SKILLS_MATRIX` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working setup.
//!
//! # Example
//!
//! ```no_run
//! use skills_matrix::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog at {}", config.catalog.path.display());
//! ```

mod assessment;
mod catalog;
mod error;
mod logging;
mod storage;

pub use assessment::AssessmentConfig;
pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

use crate::application::engine::EngineSettings;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Assessment state persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog bundle location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Inference and session-building tunables
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SKILLS_MATRIX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SKILLS_MATRIX__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    /// - `SKILLS_MATRIX__ASSESSMENT__AUTO_APPLY_THRESHOLD=0.9` -> `assessment.auto_apply_threshold = 0.9`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SKILLS_MATRIX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.catalog.validate()?;
        self.assessment.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Engine settings derived from the storage and assessment sections
    pub fn engine_settings(&self) -> Result<EngineSettings, ValidationError> {
        self.assessment.engine_settings(&self.storage.key)
    }
}
