//! Assessment mode and session setup.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, RoleId};

/// How many skills a session covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    /// Core skills only.
    Quick,
    /// Every skill matching the filters.
    #[default]
    Standard,
}

impl AssessmentMode {
    /// Returns true if a skill with the given core flag belongs in the session.
    pub fn includes(&self, is_core: bool) -> bool {
        match self {
            AssessmentMode::Quick => is_core,
            AssessmentMode::Standard => true,
        }
    }
}

/// Parameters for starting an assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssessmentSetup {
    pub name: Option<String>,
    /// `None` starts a role-agnostic session.
    pub role: Option<RoleId>,
    pub categories: Vec<CategoryId>,
    pub mode: AssessmentMode,
}

impl AssessmentSetup {
    /// Creates a role-agnostic, standard-mode setup over `categories`.
    pub fn new<I, C>(categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CategoryId>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<RoleId>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_mode(mut self, mode: AssessmentMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_mode_only_includes_core_skills() {
        assert!(AssessmentMode::Quick.includes(true));
        assert!(!AssessmentMode::Quick.includes(false));
        assert!(AssessmentMode::Standard.includes(false));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AssessmentMode::Quick).unwrap(), "\"quick\"");
        let mode: AssessmentMode = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(mode, AssessmentMode::Standard);
    }

    #[test]
    fn setup_builder_fills_fields() {
        let setup = AssessmentSetup::new(["technical"])
            .with_name("Ada")
            .with_role("data_analyst")
            .with_mode(AssessmentMode::Quick);

        assert_eq!(setup.name.as_deref(), Some("Ada"));
        assert_eq!(setup.role, Some(RoleId::from("data_analyst")));
        assert_eq!(setup.categories, vec![CategoryId::from("technical")]);
        assert_eq!(setup.mode, AssessmentMode::Quick);
    }
}
