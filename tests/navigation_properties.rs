//! Property tests for engine navigation and progress accounting.
//!
//! Random operation sequences are replayed against an engine; after every
//! step the cursor must stay inside the sequence and progress totals must
//! reconcile with the answers recorded for the session. Stepping forward or
//! back only comes to rest on a skill answered by inference at either end
//! of the sequence.

use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

use skills_matrix::adapters::InMemoryStateStore;
use skills_matrix::application::{AssessmentEngine, EngineSettings};
use skills_matrix::domain::assessment::{AssessmentMode, AssessmentSetup};
use skills_matrix::domain::catalog::Catalog;
use skills_matrix::domain::foundation::Level;

const SKILLS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

#[derive(Debug, Clone)]
enum Op {
    Answer(usize, Option<u8>),
    Accept(usize),
    Next,
    Previous,
    GoTo(usize),
    NextUnanswered,
    Complete,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SKILLS.len(), proptest::option::of(0u8..=6)).prop_map(|(i, l)| Op::Answer(i, l)),
        (0..SKILLS.len()).prop_map(Op::Accept),
        Just(Op::Next),
        Just(Op::Previous),
        (0usize..12).prop_map(Op::GoTo),
        Just(Op::NextUnanswered),
        Just(Op::Complete),
    ]
}

fn catalog() -> Arc<Catalog> {
    let skills: Vec<_> = SKILLS
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": id.to_uppercase(),
                "category": if *id < "e" { "tech" } else { "soft" },
                "levels": { "dev": [1, 2, 3, 4] }
            })
        })
        .collect();
    let catalog: Catalog = serde_json::from_value(json!({
        "roles": [{ "id": "dev", "name": "Developer" }],
        "skills": skills,
        "core_skills_by_role": { "dev": ["a", "d"] },
        "skill_groups": { "g1": { "name": "First", "skills": ["b", "c"] } },
        "inference_rules": [
            {
                "source": "a",
                "rules": [
                    { "condition": ">= 2", "targets": [
                        { "skill": "b", "suggestion": 2, "confidence": 0.9 },
                        { "skill": "c", "suggestion": 3, "confidence": 0.95 }
                    ] },
                    { "condition": "< 2", "targets": [{ "skill": "d", "suggestion": 1, "confidence": 0.4 }] }
                ]
            },
            {
                "source": "c",
                "rules": [
                    { "condition": "=3", "targets": [{ "skill": "e", "suggestion": 3, "confidence": 0.86 }] }
                ]
            }
        ]
    }))
    .unwrap();
    Arc::new(catalog)
}

fn apply(engine: &mut AssessmentEngine, op: &Op) {
    match op {
        Op::Answer(i, Some(level)) => {
            engine.answer(SKILLS[*i], Level::rated(*level).unwrap());
        }
        Op::Answer(i, None) => {
            engine.answer(SKILLS[*i], Level::NotConcerned);
        }
        Op::Accept(i) => {
            engine.accept_inference(SKILLS[*i]);
        }
        Op::Next => {
            engine.next_skill();
        }
        Op::Previous => {
            engine.previous_skill();
        }
        Op::GoTo(index) => {
            engine.go_to_skill(*index);
        }
        Op::NextUnanswered => {
            engine.go_to_next_unanswered();
        }
        Op::Complete => engine.complete(),
    }
}

fn setup_strategy() -> impl Strategy<Value = AssessmentSetup> {
    (
        prop_oneof![
            Just(vec!["tech"]),
            Just(vec!["soft"]),
            Just(vec!["tech", "soft"]),
            Just(vec!["none"]),
        ],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(categories, scoped, quick)| {
            let mut setup = AssessmentSetup::new(categories);
            if scoped {
                setup = setup.with_role("dev");
            }
            if quick {
                setup = setup.with_mode(AssessmentMode::Quick);
            }
            setup
        })
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds(setup in setup_strategy(), ops in prop::collection::vec(op(), 0..40)) {
        let store = InMemoryStateStore::new();
        let mut engine = AssessmentEngine::new(catalog(), Arc::new(store.clone()), EngineSettings::default());
        engine.init(setup);
        let len = engine.state().skills().len();

        for op in &ops {
            apply(&mut engine, op);
            let index = engine.state().current_skill_index();
            if len == 0 {
                prop_assert_eq!(index, 0);
            } else {
                prop_assert!(index < len);
            }
        }
    }

    #[test]
    fn stepping_never_rests_on_inferred_skill_inside_sequence(
        setup in setup_strategy(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut engine = AssessmentEngine::new(
            catalog(),
            Arc::new(InMemoryStateStore::new()),
            EngineSettings::default(),
        );
        engine.init(setup);
        let len = engine.state().skills().len();

        for op in &ops {
            apply(&mut engine, op);
            if !matches!(op, Op::Next | Op::Previous) || len == 0 {
                continue;
            }
            let index = engine.state().current_skill_index();
            let entry = &engine.state().skills()[index];
            let inferred = engine
                .state()
                .answer(entry.skill_id.as_str())
                .is_some_and(|answer| answer.is_inferred());
            prop_assert!(
                !inferred || index == 0 || index == len - 1,
                "{:?} stopped on inferred skill at {} of {}",
                op,
                index,
                len
            );
        }
    }

    #[test]
    fn progress_reconciles_with_answers(setup in setup_strategy(), ops in prop::collection::vec(op(), 0..40)) {
        let mut engine = AssessmentEngine::new(
            catalog(),
            Arc::new(InMemoryStateStore::new()),
            EngineSettings::default(),
        );
        engine.init(setup);

        for op in &ops {
            apply(&mut engine, op);
        }

        let progress = engine.progress();
        let state = engine.state();
        let in_session = state
            .skills()
            .iter()
            .filter(|entry| state.answer(entry.skill_id.as_str()).is_some())
            .count();

        prop_assert_eq!(progress.total, state.skills().len());
        prop_assert_eq!(progress.answered, in_session);
        prop_assert_eq!(progress.answered, progress.inferred_count + progress.manual_count);
        prop_assert!(progress.percentage.value() <= 100);
        if progress.total == 0 {
            prop_assert_eq!(progress.percentage.value(), 0);
        }

        let group_total: usize = engine.group_progress().iter().map(|g| g.total).sum();
        prop_assert_eq!(group_total, progress.total);
    }

    #[test]
    fn persisted_state_matches_memory(setup in setup_strategy(), ops in prop::collection::vec(op(), 1..20)) {
        let store = InMemoryStateStore::new();
        let mut engine = AssessmentEngine::new(catalog(), Arc::new(store.clone()), EngineSettings::default());
        engine.init(setup);

        for op in &ops {
            apply(&mut engine, op);
        }

        let mut resumed = AssessmentEngine::new(catalog(), Arc::new(store), EngineSettings::default());
        prop_assert_eq!(resumed.load(), Some(engine.state()));
    }
}
