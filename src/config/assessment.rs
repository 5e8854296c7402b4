//! Assessment behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::engine::{EngineSettings, DEFAULT_OTHER_GROUP_NAME};
use crate::domain::foundation::Confidence;

/// Tunables for inference and session building
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Confidence at or above which suggestions are applied automatically
    #[serde(default = "default_auto_apply_threshold")]
    pub auto_apply_threshold: f64,

    /// Display name of the bucket holding ungrouped skills
    #[serde(default = "default_other_group_name")]
    pub other_group_name: String,
}

impl AssessmentConfig {
    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let threshold = self.auto_apply_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ValidationError::InvalidThreshold(threshold));
        }
        if self.other_group_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("assessment.other_group_name"));
        }
        Ok(())
    }

    /// Engine settings for these values, persisting under `storage_key`
    pub fn engine_settings(&self, storage_key: &str) -> Result<EngineSettings, ValidationError> {
        self.validate()?;
        let auto_apply_threshold = Confidence::try_new(self.auto_apply_threshold)
            .map_err(|_| ValidationError::InvalidThreshold(self.auto_apply_threshold))?;
        Ok(EngineSettings {
            storage_key: storage_key.to_string(),
            auto_apply_threshold,
            other_group_name: self.other_group_name.clone(),
        })
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            auto_apply_threshold: default_auto_apply_threshold(),
            other_group_name: default_other_group_name(),
        }
    }
}

fn default_auto_apply_threshold() -> f64 {
    Confidence::AUTO_APPLY.value()
}

fn default_other_group_name() -> String {
    DEFAULT_OTHER_GROUP_NAME.to_string()
}
