//! Logging configuration

use serde::Deserialize;
use std::error::Error;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Log filter and output format
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Build the filter. `RUST_LOG` takes precedence when set.
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }

    /// Install the global fmt subscriber, compact or JSON.
    ///
    /// # Errors
    /// Fails on a bad filter directive or when a global subscriber is
    /// already installed.
    pub fn try_init(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let builder = tracing_subscriber::fmt().with_env_filter(self.env_filter()?);
        if self.json {
            builder.json().try_init()
        } else {
            builder.with_target(false).compact().try_init()
        }
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.level"));
        }
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info,skills_matrix=debug".to_string()
}
