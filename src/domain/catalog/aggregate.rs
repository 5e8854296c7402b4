//! Catalog aggregate: the read-only input every assessment session is built from.
//!
//! A catalog is parsed once from the packaged data bundle and validated
//! before it reaches the engine. Nothing downstream re-checks it.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::errors::CatalogValidationError;
use super::role::{Category, Role, SkillGroup};
use super::rules::InferenceRule;
use super::skill::Skill;
use crate::domain::foundation::{GroupId, Level, RoleId, SkillId};

/// Length of the hex fingerprint, matching the packaging step's `_source_hash`.
const FINGERPRINT_LEN: usize = 16;

/// Immutable skill catalog with roles, groups and inference rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(
        default,
        rename = "_source_hash",
        skip_serializing_if = "Option::is_none"
    )]
    source_hash: Option<String>,

    pub roles: Vec<Role>,

    #[serde(default)]
    pub categories: Vec<Category>,

    pub skills: Vec<Skill>,

    #[serde(default)]
    pub core_skills_by_role: BTreeMap<RoleId, Vec<SkillId>>,

    #[serde(default)]
    pub skill_groups: BTreeMap<GroupId, SkillGroup>,

    #[serde(default)]
    pub inference_rules: Vec<InferenceRule>,
}

impl Catalog {
    /// Looks up a skill by id.
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id.as_str() == id)
    }

    /// Returns the group a skill belongs to.
    ///
    /// A skill belongs to at most one group in a valid catalog.
    pub fn group_of(&self, skill: &SkillId) -> Option<(&GroupId, &SkillGroup)> {
        self.skill_groups
            .iter()
            .find(|(_, group)| group.contains(skill))
    }

    /// Returns true if `skill` is core for `role`, either through the
    /// role's core list or the skill's own `core_roles`.
    pub fn is_core_for(&self, role: &RoleId, skill: &Skill) -> bool {
        skill.declares_core_for(role)
            || self
                .core_skills_by_role
                .get(role)
                .is_some_and(|ids| ids.contains(&skill.id))
    }

    /// Resolves the core skill set for a role, or for every role when `None`.
    pub fn core_skill_ids(&self, role: Option<&RoleId>) -> HashSet<SkillId> {
        match role {
            Some(role) => self
                .skills
                .iter()
                .filter(|skill| self.is_core_for(role, skill))
                .map(|skill| skill.id.clone())
                .collect(),
            None => {
                let listed = self.core_skills_by_role.values().flatten().cloned();
                let declared = self
                    .skills
                    .iter()
                    .filter(|skill| !skill.core_roles.is_empty())
                    .map(|skill| skill.id.clone());
                listed.chain(declared).collect()
            }
        }
    }

    /// Returns a short content hash identifying this catalog revision.
    ///
    /// Prefers the hash stamped by the packaging step when present.
    pub fn fingerprint(&self) -> String {
        if let Some(hash) = &self.source_hash {
            return hash.clone();
        }
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let digest = format!("{:x}", Sha256::digest(&bytes));
        digest[..FINGERPRINT_LEN].to_string()
    }

    /// Checks structural integrity, collecting every problem found.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        let mut problems = Vec::new();

        if self.roles.is_empty() {
            problems.push("catalog has no roles defined".to_string());
        }
        let role_ids = unique_ids(
            self.roles.iter().map(|r| r.id.as_str()),
            "role",
            &mut problems,
        );
        let skill_ids = unique_ids(
            self.skills.iter().map(|s| s.id.as_str()),
            "skill",
            &mut problems,
        );
        let category_ids: HashSet<&str> =
            self.categories.iter().map(|c| c.id.as_str()).collect();

        for skill in &self.skills {
            self.validate_skill(skill, &role_ids, &category_ids, &mut problems);
        }

        for (role, skills) in &self.core_skills_by_role {
            if !role_ids.contains(role.as_str()) {
                problems.push(format!("core_skills_by_role references unknown role '{role}'"));
            }
            for skill in skills {
                if !skill_ids.contains(skill.as_str()) {
                    problems.push(format!(
                        "core_skills_by_role[{role}] references unknown skill '{skill}'"
                    ));
                }
            }
        }

        let mut membership: HashMap<&str, &GroupId> = HashMap::new();
        for (group_id, group) in &self.skill_groups {
            for skill in &group.skills {
                if !skill_ids.contains(skill.as_str()) {
                    problems.push(format!("group '{group_id}' references unknown skill '{skill}'"));
                }
                if let Some(first) = membership.insert(skill.as_str(), group_id) {
                    problems.push(format!(
                        "skill '{skill}' belongs to both group '{first}' and group '{group_id}'"
                    ));
                }
            }
        }

        for rule in &self.inference_rules {
            if !skill_ids.contains(rule.source.as_str()) {
                problems.push(format!(
                    "inference_rules: source skill '{}' does not exist",
                    rule.source
                ));
            }
            for clause in &rule.clauses {
                if !clause.condition.is_well_formed() {
                    problems.push(format!(
                        "inference_rules: malformed condition '{}' on source '{}'",
                        clause.condition, rule.source
                    ));
                }
                for target in &clause.targets {
                    if !skill_ids.contains(target.skill.as_str()) {
                        problems.push(format!(
                            "inference_rules: target skill '{}' (from source '{}') does not exist",
                            target.skill, rule.source
                        ));
                    }
                    if target.suggestion > Level::MAX {
                        problems.push(format!(
                            "inference_rules: suggestion {} for '{}' exceeds level {}",
                            target.suggestion,
                            target.skill,
                            Level::MAX
                        ));
                    }
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CatalogValidationError::new(problems))
        }
    }

    fn validate_skill(
        &self,
        skill: &Skill,
        role_ids: &HashSet<&str>,
        category_ids: &HashSet<&str>,
        problems: &mut Vec<String>,
    ) {
        if skill.id.as_str().trim().is_empty() {
            problems.push(format!("skill '{}' has an empty id", skill.name));
        }
        if skill.name.trim().is_empty() {
            problems.push(format!("skill '{}' is missing required field: name", skill.id));
        }
        if !category_ids.is_empty() && !category_ids.contains(skill.category.as_str()) {
            problems.push(format!(
                "skill '{}' references unknown category '{}'",
                skill.id, skill.category
            ));
        }
        for role in skill.levels.keys() {
            if !role_ids.contains(role.as_str()) {
                problems.push(format!(
                    "skill '{}' references unknown role '{role}' in levels",
                    skill.id
                ));
            }
        }
        for role in &skill.core_roles {
            if !role_ids.contains(role.as_str()) {
                problems.push(format!(
                    "skill '{}' core_roles references unknown role '{role}'",
                    skill.id
                ));
            }
        }
    }
}

fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    kind: &str,
    problems: &mut Vec<String>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            problems.push(format!("duplicate {kind} id '{id}'"));
        }
    }
    seen
}
