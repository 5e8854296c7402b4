//! Rule evaluator.
//!
//! Maps the current answers and the catalog's inference rules to the set of
//! suggested levels. Pure and deterministic: the result depends only on the
//! inputs, so it is recomputed wholesale on every answer event.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::answer::Answer;
use crate::domain::catalog::InferenceRule;
use crate::domain::foundation::{Confidence, SkillId};

/// A level suggested for one skill by a rule whose condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferredSuggestion {
    pub skill_id: SkillId,
    pub suggested_level: u8,
    pub confidence: Confidence,
    pub source_skill: SkillId,
    pub source_level: u8,
}

impl InferredSuggestion {
    /// Returns true if `self` should replace `other` for the same target.
    ///
    /// Higher confidence wins. On equal confidence the lexicographically
    /// smaller source skill wins; candidates from the same source keep the
    /// one declared first.
    fn outranks(&self, other: &InferredSuggestion) -> bool {
        let ours = self.confidence.value();
        let theirs = other.confidence.value();
        ours > theirs || (ours == theirs && self.source_skill < other.source_skill)
    }
}

/// Computes every suggestion implied by `answers` under `rules`.
///
/// Sources without a numeric answer (unanswered or not-concerned) are
/// skipped, as are targets that hold a manual answer.
pub fn evaluate_inferences(
    answers: &BTreeMap<SkillId, Answer>,
    rules: &[InferenceRule],
) -> BTreeMap<SkillId, InferredSuggestion> {
    let mut suggestions: BTreeMap<SkillId, InferredSuggestion> = BTreeMap::new();

    for rule in rules {
        let Some(source_level) = answers
            .get(&rule.source)
            .and_then(|answer| answer.level.as_rating())
        else {
            continue;
        };

        for clause in rule
            .clauses
            .iter()
            .filter(|clause| clause.condition.holds(source_level))
        {
            for target in &clause.targets {
                if answers.get(&target.skill).is_some_and(Answer::is_manual) {
                    continue;
                }

                let candidate = InferredSuggestion {
                    skill_id: target.skill.clone(),
                    suggested_level: target.suggestion,
                    confidence: target.confidence,
                    source_skill: rule.source.clone(),
                    source_level,
                };

                match suggestions.entry(target.skill.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(mut slot) => {
                        if candidate.outranks(slot.get()) {
                            slot.insert(candidate);
                        }
                    }
                }
            }
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Level, Timestamp};
    use serde_json::json;

    fn rules(value: serde_json::Value) -> Vec<InferenceRule> {
        serde_json::from_value(value).unwrap()
    }

    fn sql_rules() -> Vec<InferenceRule> {
        rules(json!([
            { "source": "sql", "rules": [
                { "condition": ">= 3", "targets": [{ "skill": "python", "suggestion": 2, "confidence": 0.8 }] },
                { "condition": "<= 1", "targets": [{ "skill": "python", "suggestion": 0, "confidence": 0.9 }] }
            ] }
        ]))
    }

    fn answers(entries: &[(&str, Level, bool)]) -> BTreeMap<SkillId, Answer> {
        let now = Timestamp::now();
        entries
            .iter()
            .map(|(id, level, manual)| {
                let answer = if *manual {
                    Answer::manual(SkillId::from(*id), *level, now)
                } else {
                    Answer::inferred(SkillId::from(*id), *level, None, None, now)
                };
                (SkillId::from(*id), answer)
            })
            .collect()
    }

    #[test]
    fn high_source_level_triggers_matching_clause() {
        let result = evaluate_inferences(&answers(&[("sql", Level::Rated(3), true)]), &sql_rules());

        let python = &result["python"];
        assert_eq!(python.suggested_level, 2);
        assert_eq!(python.confidence.value(), 0.8);
        assert_eq!(python.source_skill.as_str(), "sql");
        assert_eq!(python.source_level, 3);
    }

    #[test]
    fn low_source_level_triggers_other_clause() {
        let result = evaluate_inferences(&answers(&[("sql", Level::Rated(1), true)]), &sql_rules());
        assert_eq!(result["python"].suggested_level, 0);
        assert_eq!(result["python"].confidence.value(), 0.9);
    }

    #[test]
    fn no_clause_holds_yields_nothing() {
        let result = evaluate_inferences(&answers(&[("sql", Level::Rated(2), true)]), &sql_rules());
        assert!(result.is_empty());
    }

    #[test]
    fn unanswered_or_not_concerned_source_is_skipped() {
        assert!(evaluate_inferences(&BTreeMap::new(), &sql_rules()).is_empty());

        let nc = answers(&[("sql", Level::NotConcerned, true)]);
        assert!(evaluate_inferences(&nc, &sql_rules()).is_empty());
    }

    #[test]
    fn inferred_source_answers_still_drive_rules() {
        let result = evaluate_inferences(&answers(&[("sql", Level::Rated(4), false)]), &sql_rules());
        assert!(result.contains_key("python"));
    }

    #[test]
    fn manual_target_is_never_suggested() {
        let current = answers(&[("sql", Level::Rated(3), true), ("python", Level::Rated(4), true)]);
        assert!(evaluate_inferences(&current, &sql_rules()).is_empty());
    }

    #[test]
    fn inferred_target_can_be_resuggested() {
        let current = answers(&[("sql", Level::Rated(3), true), ("python", Level::Rated(0), false)]);
        let result = evaluate_inferences(&current, &sql_rules());
        assert_eq!(result["python"].suggested_level, 2);
    }

    #[test]
    fn highest_confidence_wins_across_rules() {
        let rules = rules(json!([
            { "source": "a", "rules": [
                { "condition": ">= 1", "targets": [{ "skill": "t", "suggestion": 1, "confidence": 0.6 }] }
            ] },
            { "source": "b", "rules": [
                { "condition": ">= 1", "targets": [{ "skill": "t", "suggestion": 4, "confidence": 0.95 }] }
            ] }
        ]));
        let current = answers(&[("a", Level::Rated(2), true), ("b", Level::Rated(2), true)]);

        let result = evaluate_inferences(&current, &rules);
        assert_eq!(result["t"].suggested_level, 4);
        assert_eq!(result["t"].source_skill.as_str(), "b");
    }

    #[test]
    fn equal_confidence_prefers_smaller_source_id() {
        let rules = rules(json!([
            { "source": "zeta", "rules": [
                { "condition": ">= 0", "targets": [{ "skill": "t", "suggestion": 5, "confidence": 0.7 }] }
            ] },
            { "source": "alpha", "rules": [
                { "condition": ">= 0", "targets": [{ "skill": "t", "suggestion": 1, "confidence": 0.7 }] }
            ] }
        ]));
        let current = answers(&[("zeta", Level::Rated(1), true), ("alpha", Level::Rated(1), true)]);

        let result = evaluate_inferences(&current, &rules);
        assert_eq!(result["t"].source_skill.as_str(), "alpha");
        assert_eq!(result["t"].suggested_level, 1);
    }

    #[test]
    fn equal_confidence_from_same_source_keeps_first_clause() {
        let rules = rules(json!([
            { "source": "a", "rules": [
                { "condition": ">= 1", "targets": [{ "skill": "t", "suggestion": 2, "confidence": 0.5 }] },
                { "condition": ">= 2", "targets": [{ "skill": "t", "suggestion": 3, "confidence": 0.5 }] }
            ] }
        ]));
        let current = answers(&[("a", Level::Rated(2), true)]);

        assert_eq!(evaluate_inferences(&current, &rules)["t"].suggested_level, 2);
    }

    #[test]
    fn malformed_condition_evaluates_false() {
        let rules = rules(json!([
            { "source": "a", "rules": [
                { "condition": "roughly 3", "targets": [{ "skill": "t", "suggestion": 2, "confidence": 1.0 }] }
            ] }
        ]));
        let current = answers(&[("a", Level::Rated(3), true)]);
        assert!(evaluate_inferences(&current, &rules).is_empty());
    }
}
