//! AssessmentEngine - owns one respondent's assessment and keeps it persisted.

use std::sync::Arc;

use super::settings::EngineSettings;
use crate::domain::assessment::{
    build_session_plan, Answer, AssessmentProgress, AssessmentSetup, AssessmentState,
    AssessmentStatus, CurrentGroup, GroupProgress, SessionSkill,
};
use crate::domain::catalog::{Catalog, Skill};
use crate::domain::foundation::{Confidence, Level, SkillId, Timestamp};
use crate::ports::{StateStore, StateStoreError};

/// The skill under the cursor, with its catalog definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentSkill<'a> {
    pub index: usize,
    pub entry: &'a SessionSkill,
    /// `None` when the session was built from a catalog revision that no
    /// longer defines this skill.
    pub skill: Option<&'a Skill>,
}

/// Engine for a single assessment session.
///
/// Every mutating operation writes the full state to the store before
/// returning. A failed write is logged and the in-memory update stands.
pub struct AssessmentEngine {
    catalog: Arc<Catalog>,
    store: Arc<dyn StateStore>,
    settings: EngineSettings,
    state: AssessmentState,
}

impl AssessmentEngine {
    /// Creates an engine with an empty, not-started state.
    ///
    /// Call [`load`](Self::load) to resume a persisted session.
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn StateStore>, settings: EngineSettings) -> Self {
        Self {
            catalog,
            store,
            settings,
            state: AssessmentState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts a new session, replacing whatever was in progress.
    pub fn init(&mut self, setup: AssessmentSetup) -> &AssessmentState {
        let plan = build_session_plan(&self.catalog, &setup, &self.settings.other_group_name);
        tracing::info!(
            role = setup.role.as_ref().map_or("any", |r| r.as_str()),
            mode = ?setup.mode,
            skills = plan.skills.len(),
            groups = plan.groups.len(),
            "assessment started"
        );
        if plan.skills.is_empty() {
            tracing::warn!("no skills matched the selected role and categories");
        }

        self.state = AssessmentState::start(
            &setup,
            plan,
            Some(self.catalog.fingerprint()),
            Timestamp::now(),
        );
        self.persist();
        &self.state
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.rename(name);
        self.persist();
    }

    /// Stamps the completion time. Unanswered skills do not block completion.
    pub fn complete(&mut self) {
        self.state.mark_completed(Timestamp::now());
        let progress = self.state.progress();
        tracing::info!(
            answered = progress.answered,
            total = progress.total,
            elapsed_secs = self.state.elapsed().map_or(0, |d| d.num_seconds()),
            "assessment completed"
        );
        self.persist();
    }

    /// Resets to the empty state and removes the persisted record.
    pub fn clear(&mut self) {
        self.state = AssessmentState::default();
        match self.store.delete(&self.settings.storage_key) {
            Ok(()) => tracing::info!(key = %self.settings.storage_key, "assessment cleared"),
            Err(e) => tracing::error!(
                key = %self.settings.storage_key,
                error = %e,
                "failed to remove persisted assessment"
            ),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Answers
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a manual answer.
    ///
    /// Returns the skills that received an automatically applied answer.
    pub fn answer(&mut self, skill_id: impl Into<SkillId>, level: Level) -> Vec<SkillId> {
        self.record(Answer::manual(skill_id.into(), level, Timestamp::now()))
    }

    /// Records an answer on behalf of inference, as if a rule had applied it.
    pub fn answer_inferred(
        &mut self,
        skill_id: impl Into<SkillId>,
        level: Level,
        confidence: Option<Confidence>,
        source_skill: Option<SkillId>,
    ) -> Vec<SkillId> {
        self.record(Answer::inferred(
            skill_id.into(),
            level,
            confidence,
            source_skill,
            Timestamp::now(),
        ))
    }

    /// Writes `answer` as given, re-evaluates the rules and applies
    /// confident suggestions to skills without a manual answer.
    pub fn record(&mut self, answer: Answer) -> Vec<SkillId> {
        tracing::debug!(
            skill = %answer.skill_id,
            level = %answer.level,
            manual = answer.is_manual(),
            "answer recorded"
        );
        let applied = self.state.record_answer(
            answer,
            &self.catalog.inference_rules,
            self.settings.auto_apply_threshold,
        );
        if !applied.is_empty() {
            tracing::debug!(skills = ?applied, "suggestions applied automatically");
        }
        self.persist();
        applied
    }

    /// Accepts the current suggestion for `skill_id` as an inferred answer.
    ///
    /// Returns `false` and changes nothing when there is no suggestion.
    pub fn accept_inference(&mut self, skill_id: &str) -> bool {
        let Some(suggestion) = self.state.inference(skill_id).cloned() else {
            tracing::debug!(skill = skill_id, "no suggestion to accept");
            return false;
        };
        self.record(Answer::inferred(
            suggestion.skill_id,
            Level::Rated(suggestion.suggested_level.min(Level::MAX)),
            Some(suggestion.confidence),
            Some(suggestion.source_skill),
            Timestamp::now(),
        ));
        true
    }

    /// Records a manual answer in place of a suggestion. The skill is then
    /// shielded from inference until the session is reset.
    pub fn override_inference(&mut self, skill_id: impl Into<SkillId>, level: Level) -> Vec<SkillId> {
        self.answer(skill_id, level)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves forward, skipping skills answered by inference. Returns the new index.
    pub fn next_skill(&mut self) -> usize {
        self.state.advance();
        self.after_move("next")
    }

    /// Moves back, skipping skills answered by inference. Returns the new index.
    pub fn previous_skill(&mut self) -> usize {
        self.state.retreat();
        self.after_move("previous")
    }

    /// Jumps to `index`, clamped to the sequence. Returns the new index.
    pub fn go_to_skill(&mut self, index: usize) -> usize {
        self.state.jump_to(index);
        self.after_move("jump")
    }

    /// Jumps to the first unanswered skill at or after the cursor.
    ///
    /// Leaves the cursor alone (and persists nothing) when every remaining
    /// skill has an answer.
    pub fn go_to_next_unanswered(&mut self) -> Option<usize> {
        let index = self.get_next_unanswered_index(self.state.current_skill_index())?;
        Some(self.go_to_skill(index))
    }

    /// First index at or after `from` with no answer at all.
    pub fn get_next_unanswered_index(&self, from: usize) -> Option<usize> {
        self.state.next_unanswered_from(from)
    }

    fn after_move(&self, direction: &str) -> usize {
        let index = self.state.current_skill_index();
        tracing::debug!(direction, index, "cursor moved");
        self.persist();
        index
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn status(&self) -> AssessmentStatus {
        self.state.status()
    }

    pub fn progress(&self) -> AssessmentProgress {
        self.state.progress()
    }

    pub fn current_skill(&self) -> Option<CurrentSkill<'_>> {
        let entry = self.state.current_entry()?;
        Some(CurrentSkill {
            index: self.state.current_skill_index(),
            entry,
            skill: self.catalog.skill(entry.skill_id.as_str()),
        })
    }

    pub fn current_group(&self) -> Option<CurrentGroup> {
        self.state.current_group()
    }

    pub fn group_progress(&self) -> Vec<GroupProgress> {
        self.state.group_progress()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Writes the full state under the configured key.
    ///
    /// # Errors
    /// Returns the store's error; the in-memory state is unaffected.
    pub fn save(&self) -> Result<(), StateStoreError> {
        self.store.save(&self.settings.storage_key, &self.state)
    }

    /// Replaces the in-memory state with the persisted record.
    ///
    /// Returns `None` when there is no record or it cannot be read; the
    /// in-memory state is then left untouched.
    pub fn load(&mut self) -> Option<&AssessmentState> {
        let key = &self.settings.storage_key;
        let restored = match self.store.load(key) {
            Ok(state) => state.normalized(),
            Err(StateStoreError::NotFound(_)) => {
                tracing::debug!(key = %key, "no persisted assessment");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to load assessment state");
                return None;
            }
        };

        let current = self.catalog.fingerprint();
        match restored.catalog_fingerprint() {
            Some(saved) if saved != current => tracing::warn!(
                saved,
                current = %current,
                "assessment was built from a different catalog revision"
            ),
            _ => {}
        }

        tracing::info!(
            key = %key,
            status = ?restored.status(),
            answers = restored.answers().len(),
            "assessment restored"
        );
        self.state = restored;
        Some(&self.state)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(
                key = %self.settings.storage_key,
                error = %e,
                "failed to persist assessment state"
            );
        }
    }
}
