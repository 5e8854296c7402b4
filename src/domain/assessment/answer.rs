//! Recorded answers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, Level, SkillId, Timestamp};

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum AnswerOrigin {
    /// Entered by the respondent. Never overwritten by inference.
    Manual,
    /// Applied from an inference rule, or by the caller on its behalf.
    Inferred {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confidence: Option<Confidence>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_skill: Option<SkillId>,
    },
}

/// A level recorded for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub skill_id: SkillId,
    pub level: Level,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub origin: AnswerOrigin,
}

impl Answer {
    /// Creates a manually entered answer.
    pub fn manual(skill_id: SkillId, level: Level, timestamp: Timestamp) -> Self {
        Self {
            skill_id,
            level,
            timestamp,
            origin: AnswerOrigin::Manual,
        }
    }

    /// Creates an inferred answer.
    pub fn inferred(
        skill_id: SkillId,
        level: Level,
        confidence: Option<Confidence>,
        source_skill: Option<SkillId>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            skill_id,
            level,
            timestamp,
            origin: AnswerOrigin::Inferred {
                confidence,
                source_skill,
            },
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.origin, AnswerOrigin::Manual)
    }

    pub fn is_inferred(&self) -> bool {
        !self.is_manual()
    }

    /// Confidence of an inferred answer.
    pub fn confidence(&self) -> Option<Confidence> {
        match &self.origin {
            AnswerOrigin::Inferred { confidence, .. } => *confidence,
            AnswerOrigin::Manual => None,
        }
    }

    /// Skill whose answer produced this inferred answer.
    pub fn source_skill(&self) -> Option<&SkillId> {
        match &self.origin {
            AnswerOrigin::Inferred { source_skill, .. } => source_skill.as_ref(),
            AnswerOrigin::Manual => None,
        }
    }
}
