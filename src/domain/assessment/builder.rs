//! Session builder: selects and orders the skills of one assessment.
//!
//! # Ordering
//!
//! 1. Skills are bucketed by group, buckets in first-encounter order.
//! 2. Within a bucket, core skills come first, then alphabetical by name.
//! 3. Ungrouped skills form a trailing bucket under [`GroupId::OTHER`].
//! 4. Quick mode drops non-core skills from every bucket; buckets left
//!    empty do not appear in the group list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::mode::AssessmentSetup;
use crate::domain::catalog::{Catalog, Skill};
use crate::domain::foundation::{CategoryId, GroupId, RoleId, SkillId};

/// One entry of a session's skill sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSkill {
    pub skill_id: SkillId,
    pub name: String,
    pub category: CategoryId,
    pub group_id: GroupId,
    pub group_name: String,
    pub is_core: bool,
}

/// The ordered skill sequence and the groups it passes through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPlan {
    pub skills: Vec<SessionSkill>,
    pub groups: Vec<GroupId>,
}

/// Builds the session plan for `setup` from `catalog`.
///
/// `other_group_name` labels the bucket of ungrouped skills.
/// An empty plan is a valid result.
pub fn build_session_plan(
    catalog: &Catalog,
    setup: &AssessmentSetup,
    other_group_name: &str,
) -> SessionPlan {
    let role = setup.role.as_ref();
    let core = catalog.core_skill_ids(role);

    let mut buckets: Vec<(GroupId, Vec<SessionSkill>)> = Vec::new();
    let mut ungrouped: Vec<SessionSkill> = Vec::new();

    for skill in catalog
        .skills
        .iter()
        .filter(|skill| is_selected(catalog, skill, role, &setup.categories))
    {
        let is_core = core.contains(&skill.id);
        match catalog.group_of(&skill.id) {
            Some((group_id, group)) => {
                let entry = session_skill(skill, group_id.clone(), &group.name, is_core);
                match buckets.iter_mut().find(|(id, _)| id == group_id) {
                    Some((_, members)) => members.push(entry),
                    None => buckets.push((group_id.clone(), vec![entry])),
                }
            }
            None => ungrouped.push(session_skill(
                skill,
                GroupId::other(),
                other_group_name,
                is_core,
            )),
        }
    }
    buckets.push((GroupId::other(), ungrouped));

    let mut plan = SessionPlan::default();
    for (group_id, mut members) in buckets {
        members.retain(|entry| setup.mode.includes(entry.is_core));
        if members.is_empty() {
            continue;
        }
        members.sort_by(compare_entries);
        plan.groups.push(group_id);
        plan.skills.extend(members);
    }
    plan
}

fn is_selected(
    catalog: &Catalog,
    skill: &Skill,
    role: Option<&RoleId>,
    categories: &[CategoryId],
) -> bool {
    if !categories.contains(&skill.category) {
        return false;
    }
    match role {
        Some(role) => skill.has_levels_for(role) || catalog.is_core_for(role, skill),
        None => skill.has_any_levels(),
    }
}

fn session_skill(skill: &Skill, group_id: GroupId, group_name: &str, is_core: bool) -> SessionSkill {
    SessionSkill {
        skill_id: skill.id.clone(),
        name: skill.name.clone(),
        category: skill.category.clone(),
        group_id,
        group_name: group_name.to_string(),
        is_core,
    }
}

/// Core first, then by name ignoring case, with exact name and id as
/// tie-breakers so the order is total.
fn compare_entries(a: &SessionSkill, b: &SessionSkill) -> Ordering {
    b.is_core
        .cmp(&a.is_core)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.skill_id.cmp(&b.skill_id))
}

/// Returns the distinct skill ids of a plan, for membership checks.
pub(crate) fn skill_id_set(skills: &[SessionSkill]) -> HashSet<&SkillId> {
    skills.iter().map(|entry| &entry.skill_id).collect()
}
