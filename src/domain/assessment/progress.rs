//! Progress projections.
//!
//! Derived views over a session's skill sequence and answers. Nothing here
//! is stored; every value is recomputed from the canonical state on read.

use serde::Serialize;
use std::collections::BTreeMap;

use super::answer::Answer;
use super::builder::{skill_id_set, SessionSkill};
use crate::domain::foundation::{GroupId, Percentage, SkillId};

/// Completion snapshot for a whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AssessmentProgress {
    pub answered: usize,
    pub total: usize,
    pub percentage: Percentage,
    pub inferred_count: usize,
    pub manual_count: usize,
}

impl AssessmentProgress {
    /// Counts answers for skills in `skills`.
    ///
    /// Answers left over from an earlier session are ignored.
    pub fn compute(skills: &[SessionSkill], answers: &BTreeMap<SkillId, Answer>) -> Self {
        let in_session = skill_id_set(skills);
        let (inferred_count, manual_count) = answers
            .iter()
            .filter(|(id, _)| in_session.contains(id))
            .fold((0, 0), |(inferred, manual), (_, answer)| {
                if answer.is_inferred() {
                    (inferred + 1, manual)
                } else {
                    (inferred, manual + 1)
                }
            });
        let answered = inferred_count + manual_count;
        let total = skills.len();

        Self {
            answered,
            total,
            percentage: Percentage::of(answered, total),
            inferred_count,
            manual_count,
        }
    }

    /// Returns the number of skills still without an answer.
    pub fn remaining(&self) -> usize {
        self.total - self.answered
    }
}

/// Answer tally for one group of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupProgress {
    pub group_id: GroupId,
    pub name: String,
    pub answered: usize,
    pub total: usize,
}

impl GroupProgress {
    /// Tallies every group in sequence order.
    pub fn tally(skills: &[SessionSkill], answers: &BTreeMap<SkillId, Answer>) -> Vec<Self> {
        let mut groups: Vec<GroupProgress> = Vec::new();
        for entry in skills {
            let index = match groups.iter().position(|g| g.group_id == entry.group_id) {
                Some(index) => index,
                None => {
                    groups.push(GroupProgress {
                        group_id: entry.group_id.clone(),
                        name: entry.group_name.clone(),
                        answered: 0,
                        total: 0,
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[index];
            group.total += 1;
            if answers.contains_key(&entry.skill_id) {
                group.answered += 1;
            }
        }
        groups
    }
}

/// Where the cursor sits relative to its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentGroup {
    pub group_id: GroupId,
    pub group_name: String,
    /// The current skill opens a group: it is first overall or follows
    /// a skill from another group.
    pub is_new_group: bool,
    /// 1-based position of the current skill within its group.
    pub position_in_group: usize,
    pub group_size: usize,
    pub is_core: bool,
}

impl CurrentGroup {
    /// Describes the group of the skill at `index`, if there is one.
    pub fn locate(skills: &[SessionSkill], index: usize) -> Option<Self> {
        let current = skills.get(index)?;
        let is_new_group = index
            .checked_sub(1)
            .and_then(|prev| skills.get(prev))
            .map_or(true, |prev| prev.group_id != current.group_id);

        let members: Vec<&SessionSkill> = skills
            .iter()
            .filter(|entry| entry.group_id == current.group_id)
            .collect();
        let position_in_group = members
            .iter()
            .position(|entry| entry.skill_id == current.skill_id)
            .map_or(0, |pos| pos + 1);

        Some(Self {
            group_id: current.group_id.clone(),
            group_name: current.group_name.clone(),
            is_new_group,
            position_in_group,
            group_size: members.len(),
            is_core: current.is_core,
        })
    }
}
