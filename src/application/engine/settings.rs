//! Engine settings.

use crate::domain::foundation::Confidence;

/// Default persistence key for the assessment record.
pub const DEFAULT_STORAGE_KEY: &str = "skills-matrix-assessment";

/// Default display name of the bucket holding ungrouped skills.
pub const DEFAULT_OTHER_GROUP_NAME: &str = "Other skills";

/// Tunables for an `AssessmentEngine`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Key the assessment record is stored under. Other application data
    /// (such as a theme preference) lives under its own keys.
    pub storage_key: String,
    /// Suggestions at or above this confidence are applied automatically.
    pub auto_apply_threshold: Confidence,
    pub other_group_name: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            auto_apply_threshold: Confidence::AUTO_APPLY,
            other_group_name: DEFAULT_OTHER_GROUP_NAME.to_string(),
        }
    }
}
