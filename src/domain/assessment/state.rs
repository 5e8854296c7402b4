//! Assessment session state.
//!
//! `AssessmentState` is the unit of persistence: everything needed to resume
//! a self-assessment after a reload. Transitions here are pure in-memory
//! updates; persisting them is the engine's job.
//!
//! # Invariants
//!
//! - `current_skill_index` is within `[0, skills.len() - 1]` when the
//!   sequence is non-empty, otherwise 0
//! - Manual answers are never replaced by inference
//! - `inferences` always reflects the answers as of the last answer event

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::answer::Answer;
use super::builder::{SessionPlan, SessionSkill};
use super::inference::{evaluate_inferences, InferredSuggestion};
use super::mode::{AssessmentMode, AssessmentSetup};
use super::progress::{AssessmentProgress, CurrentGroup, GroupProgress};
use crate::domain::catalog::InferenceRule;
use crate::domain::foundation::{CategoryId, Confidence, GroupId, Level, RoleId, SkillId, Timestamp};

/// Lifecycle of an assessment, derived from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Full state of one respondent's assessment session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentState {
    name: Option<String>,
    role: Option<RoleId>,
    categories: Vec<CategoryId>,
    mode: AssessmentMode,
    answers: BTreeMap<SkillId, Answer>,
    inferences: BTreeMap<SkillId, InferredSuggestion>,
    current_skill_index: usize,
    skills: Vec<SessionSkill>,
    skill_groups: Vec<GroupId>,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog_fingerprint: Option<String>,
}

impl AssessmentState {
    /// Starts a fresh session from a built plan.
    ///
    /// Answers and inferences start empty; nothing carries over.
    pub fn start(
        setup: &AssessmentSetup,
        plan: SessionPlan,
        catalog_fingerprint: Option<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            name: setup.name.clone(),
            role: setup.role.clone(),
            categories: setup.categories.clone(),
            mode: setup.mode,
            answers: BTreeMap::new(),
            inferences: BTreeMap::new(),
            current_skill_index: 0,
            skills: plan.skills,
            skill_groups: plan.groups,
            started_at: Some(now),
            completed_at: None,
            catalog_fingerprint,
        }
    }

    /// Re-establishes the cursor invariant on state restored from storage.
    pub fn normalized(mut self) -> Self {
        self.current_skill_index = self.clamp_index(self.current_skill_index);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn role(&self) -> Option<&RoleId> {
        self.role.as_ref()
    }

    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn mode(&self) -> AssessmentMode {
        self.mode
    }

    pub fn answers(&self) -> &BTreeMap<SkillId, Answer> {
        &self.answers
    }

    pub fn answer(&self, skill_id: &str) -> Option<&Answer> {
        self.answers.get(skill_id)
    }

    pub fn inferences(&self) -> &BTreeMap<SkillId, InferredSuggestion> {
        &self.inferences
    }

    pub fn inference(&self, skill_id: &str) -> Option<&InferredSuggestion> {
        self.inferences.get(skill_id)
    }

    pub fn current_skill_index(&self) -> usize {
        self.current_skill_index
    }

    pub fn skills(&self) -> &[SessionSkill] {
        &self.skills
    }

    pub fn skill_groups(&self) -> &[GroupId] {
        &self.skill_groups
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn catalog_fingerprint(&self) -> Option<&str> {
        self.catalog_fingerprint.as_deref()
    }

    /// Time from start to completion, once the assessment is completed.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started_at?;
        let completed = self.completed_at?;
        Some(completed.duration_since(&started))
    }

    pub fn status(&self) -> AssessmentStatus {
        match (self.started_at, self.completed_at) {
            (_, Some(_)) => AssessmentStatus::Completed,
            (Some(_), None) => AssessmentStatus::InProgress,
            (None, None) => AssessmentStatus::NotStarted,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Records an answer, then re-evaluates every rule and auto-applies
    /// suggestions at or above `threshold` to skills without a manual answer.
    ///
    /// The caller's answer is written as given, whatever was there before.
    /// Returns the ids of the skills that received an inferred answer.
    pub fn record_answer(
        &mut self,
        answer: Answer,
        rules: &[InferenceRule],
        threshold: Confidence,
    ) -> Vec<SkillId> {
        let now = answer.timestamp;
        self.answers.insert(answer.skill_id.clone(), answer);

        let suggestions = evaluate_inferences(&self.answers, rules);
        let mut applied = Vec::new();
        for suggestion in suggestions.values() {
            let is_manual = self
                .answers
                .get(&suggestion.skill_id)
                .is_some_and(Answer::is_manual);
            if is_manual || !suggestion.confidence.meets(threshold) {
                continue;
            }
            self.answers.insert(
                suggestion.skill_id.clone(),
                Answer::inferred(
                    suggestion.skill_id.clone(),
                    Level::Rated(suggestion.suggested_level.min(Level::MAX)),
                    Some(suggestion.confidence),
                    Some(suggestion.source_skill.clone()),
                    now,
                ),
            );
            applied.push(suggestion.skill_id.clone());
        }

        self.inferences = suggestions;
        applied
    }

    /// Moves forward one skill, then past any skills answered only by
    /// inference. Stops at the last skill; never wraps.
    pub fn advance(&mut self) {
        let Some(last) = self.skills.len().checked_sub(1) else {
            self.current_skill_index = 0;
            return;
        };
        let mut index = self.current_skill_index + 1;
        while index <= last && self.is_auto_inferred(index) {
            index += 1;
        }
        self.current_skill_index = index.min(last);
    }

    /// Moves back one skill, then past any skills answered only by
    /// inference. Stops at the first skill; never wraps.
    pub fn retreat(&mut self) {
        let mut index = self.current_skill_index.checked_sub(1);
        while let Some(i) = index {
            if !self.is_auto_inferred(i) {
                break;
            }
            index = i.checked_sub(1);
        }
        self.current_skill_index = self.clamp_index(index.unwrap_or(0));
    }

    /// Jumps straight to `index`, clamped to the sequence. No skipping.
    pub fn jump_to(&mut self, index: usize) {
        self.current_skill_index = self.clamp_index(index);
    }

    /// Stamps the completion time. Unanswered skills do not block completion.
    pub fn mark_completed(&mut self, now: Timestamp) {
        self.completed_at = Some(now);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// First index at or after `from` whose skill has no answer at all.
    ///
    /// Inferred answers count as answered here.
    pub fn next_unanswered_from(&self, from: usize) -> Option<usize> {
        self.skills
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, entry)| !self.answers.contains_key(&entry.skill_id))
            .map(|(index, _)| index)
    }

    pub fn current_entry(&self) -> Option<&SessionSkill> {
        self.skills.get(self.current_skill_index)
    }

    pub fn current_group(&self) -> Option<CurrentGroup> {
        CurrentGroup::locate(&self.skills, self.current_skill_index)
    }

    pub fn progress(&self) -> AssessmentProgress {
        AssessmentProgress::compute(&self.skills, &self.answers)
    }

    pub fn group_progress(&self) -> Vec<GroupProgress> {
        GroupProgress::tally(&self.skills, &self.answers)
    }

    fn is_auto_inferred(&self, index: usize) -> bool {
        self.skills
            .get(index)
            .and_then(|entry| self.answers.get(&entry.skill_id))
            .is_some_and(Answer::is_inferred)
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.skills.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CategoryId, Percentage};
    use serde_json::json;

    fn threshold() -> Confidence {
        Confidence::try_new(0.85).unwrap()
    }

    fn entry(id: &str) -> SessionSkill {
        SessionSkill {
            skill_id: SkillId::from(id),
            name: id.to_uppercase(),
            category: CategoryId::from("tech"),
            group_id: GroupId::other(),
            group_name: "Other skills".to_string(),
            is_core: false,
        }
    }

    fn state_with(ids: &[&str]) -> AssessmentState {
        let plan = SessionPlan {
            skills: ids.iter().map(|id| entry(id)).collect(),
            groups: vec![GroupId::other()],
        };
        AssessmentState::start(
            &AssessmentSetup::new(["tech"]).with_name("Ada"),
            plan,
            None,
            Timestamp::now(),
        )
    }

    fn manual(id: &str, level: u8) -> Answer {
        Answer::manual(SkillId::from(id), Level::Rated(level), Timestamp::now())
    }

    fn inferred(id: &str) -> Answer {
        Answer::inferred(SkillId::from(id), Level::Rated(1), None, None, Timestamp::now())
    }

    fn rules() -> Vec<InferenceRule> {
        serde_json::from_value(json!([
            { "source": "a", "rules": [
                { "condition": ">= 3", "targets": [{ "skill": "b", "suggestion": 2, "confidence": 0.8 }] },
                { "condition": "<= 1", "targets": [{ "skill": "b", "suggestion": 0, "confidence": 0.9 }] }
            ] }
        ]))
        .unwrap()
    }

    #[test]
    fn default_state_is_not_started() {
        let state = AssessmentState::default();
        assert_eq!(state.status(), AssessmentStatus::NotStarted);
        assert_eq!(state.current_skill_index(), 0);
        assert_eq!(state.progress().percentage, Percentage::ZERO);
    }

    #[test]
    fn start_resets_everything() {
        let state = state_with(&["a", "b"]);
        assert_eq!(state.status(), AssessmentStatus::InProgress);
        assert_eq!(state.name(), Some("Ada"));
        assert!(state.answers().is_empty());
        assert!(state.inferences().is_empty());
        assert_eq!(state.progress().answered, 0);
    }

    #[test]
    fn low_confidence_suggestion_is_not_applied() {
        let mut state = state_with(&["a", "b"]);
        let applied = state.record_answer(manual("a", 3), &rules(), threshold());

        assert!(applied.is_empty());
        assert_eq!(state.inference("b").unwrap().suggested_level, 2);
        assert!(state.answer("b").is_none());
    }

    #[test]
    fn high_confidence_suggestion_is_applied_as_inferred_answer() {
        let mut state = state_with(&["a", "b"]);
        state.record_answer(manual("a", 3), &rules(), threshold());
        let applied = state.record_answer(manual("a", 1), &rules(), threshold());

        assert_eq!(applied, vec![SkillId::from("b")]);
        let b = state.answer("b").unwrap();
        assert!(b.is_inferred());
        assert_eq!(b.level, Level::Rated(0));
        assert_eq!(b.source_skill(), Some(&SkillId::from("a")));
        assert_eq!(b.confidence().map(|c| c.value()), Some(0.9));
    }

    #[test]
    fn manual_answer_shields_target() {
        let mut state = state_with(&["a", "b"]);
        state.record_answer(manual("b", 4), &rules(), threshold());
        state.record_answer(manual("a", 1), &rules(), threshold());

        let b = state.answer("b").unwrap();
        assert!(b.is_manual());
        assert_eq!(b.level, Level::Rated(4));
        assert!(state.inference("b").is_none());
    }

    #[test]
    fn explicit_inferred_answer_replaces_manual_one() {
        let mut state = state_with(&["a"]);
        state.record_answer(manual("a", 4), &[], threshold());
        state.record_answer(inferred("a"), &[], threshold());
        assert!(state.answer("a").unwrap().is_inferred());
    }

    #[test]
    fn advance_skips_inferred_skills() {
        let mut state = state_with(&["a", "b", "c", "d"]);
        state.record_answer(inferred("b"), &[], threshold());
        state.record_answer(inferred("c"), &[], threshold());

        state.advance();
        assert_eq!(state.current_skill_index(), 3);

        state.retreat();
        assert_eq!(state.current_skill_index(), 0);
    }

    #[test]
    fn advance_stops_on_manual_answers() {
        let mut state = state_with(&["a", "b", "c"]);
        state.record_answer(manual("b", 2), &[], threshold());

        state.advance();
        assert_eq!(state.current_skill_index(), 1);
    }

    #[test]
    fn advance_clamps_to_last_even_if_inferred() {
        let mut state = state_with(&["a", "b", "c"]);
        state.record_answer(inferred("b"), &[], threshold());
        state.record_answer(inferred("c"), &[], threshold());

        state.advance();
        assert_eq!(state.current_skill_index(), 2);
        state.advance();
        assert_eq!(state.current_skill_index(), 2);
    }

    #[test]
    fn retreat_at_start_stays_at_zero() {
        let mut state = state_with(&["a", "b"]);
        state.retreat();
        assert_eq!(state.current_skill_index(), 0);
    }

    #[test]
    fn navigation_on_empty_sequence_is_a_no_op() {
        let mut state = state_with(&[]);
        state.advance();
        assert_eq!(state.current_skill_index(), 0);
        state.retreat();
        assert_eq!(state.current_skill_index(), 0);
        state.jump_to(5);
        assert_eq!(state.current_skill_index(), 0);
        assert!(state.current_entry().is_none());
    }

    #[test]
    fn jump_to_clamps_without_skipping() {
        let mut state = state_with(&["a", "b", "c"]);
        state.record_answer(inferred("b"), &[], threshold());

        state.jump_to(1);
        assert_eq!(state.current_skill_index(), 1);
        state.jump_to(99);
        assert_eq!(state.current_skill_index(), 2);
    }

    #[test]
    fn next_unanswered_counts_inferred_as_answered() {
        let mut state = state_with(&["a", "b", "c"]);
        state.record_answer(manual("a", 1), &[], threshold());
        state.record_answer(inferred("b"), &[], threshold());

        assert_eq!(state.next_unanswered_from(0), Some(2));
        state.record_answer(manual("c", 1), &[], threshold());
        assert_eq!(state.next_unanswered_from(0), None);
    }

    #[test]
    fn mark_completed_sets_status() {
        let mut state = state_with(&["a"]);
        state.mark_completed(Timestamp::now());
        assert_eq!(state.status(), AssessmentStatus::Completed);
        assert!(state.completed_at().is_some());
    }

    #[test]
    fn elapsed_spans_start_to_completion() {
        let setup = AssessmentSetup::new(["tech"]);
        let started = Timestamp::from_unix_millis(1_000).unwrap();
        let mut state = AssessmentState::start(&setup, SessionPlan::default(), None, started);
        assert_eq!(state.elapsed(), None);

        state.mark_completed(Timestamp::from_unix_millis(91_000).unwrap());
        assert_eq!(state.elapsed().map(|d| d.num_seconds()), Some(90));
        assert_eq!(AssessmentState::default().elapsed(), None);
    }

    #[test]
    fn normalized_clamps_restored_cursor() {
        let mut value = serde_json::to_value(state_with(&["a", "b"])).unwrap();
        value["current_skill_index"] = json!(10);
        let restored: AssessmentState = serde_json::from_value(value).unwrap();

        assert_eq!(restored.normalized().current_skill_index(), 1);
    }

    #[test]
    fn state_roundtrips_through_json() {
        let mut state = state_with(&["a", "b"]);
        state.record_answer(manual("a", 1), &rules(), threshold());
        state.advance();

        let json = serde_json::to_string(&state).unwrap();
        let back: AssessmentState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
