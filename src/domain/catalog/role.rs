//! Roles, categories and skill groups.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, RoleId, SkillId};

/// A job role in the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

/// A category of skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A named set of related skills, presented together during an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

impl SkillGroup {
    /// Returns true if the group lists `skill`.
    pub fn contains(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }
}
