//! Trainer, respondent, and evaluation harness tests.

use anamnesis_core::errors::{AnamnesisError, InterviewError};
use anamnesis_core::{Action, Answer, Catalog, Hypothesis, ValueTable};
use anamnesis_engine::{make_initial, InterviewSession, InterviewState};
use anamnesis_rules::RuleSet;
use anamnesis_training::{evaluate_policy, Respondent, Trainer, TrainerConfig};
use anamnesis_tree::{QuestionTree, TreeLayout};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn catalog(entries: &[(&str, &[&str])]) -> Catalog {
    Catalog::new(
        entries
            .iter()
            .map(|(name, positives)| Hypothesis {
                name: name.to_string(),
                positive_questions: positives.iter().map(|q| q.to_string()).collect(),
                negative_questions: Vec::new(),
            })
            .collect(),
    )
    .unwrap()
}

fn flat_tree(questions: &[&str]) -> QuestionTree {
    QuestionTree::build(&TreeLayout {
        general_questions: questions.iter().map(|q| q.to_string()).collect(),
        ..TreeLayout::default()
    })
    .unwrap()
}

/// Two hypotheses sharing one question, each with one discriminator.
fn shared_symptom_session() -> InterviewSession {
    InterviewSession::new(
        catalog(&[("H1", &["s", "d1"]), ("H2", &["s", "d2"])]),
        flat_tree(&["s", "d1", "d2"]),
        RuleSet::new(),
    )
    .unwrap()
}

fn grouped_state() -> InterviewState {
    let layout = TreeLayout::from_json_str(
        r#"{
            "general_groups": ["onset"],
            "group_questions": [
                {"group": "onset", "question": "sudden onset"},
                {"group": "onset", "question": "gradual onset"}
            ]
        }"#,
    )
    .unwrap();
    make_initial(
        catalog(&[("acute", &["sudden onset"]), ("chronic", &["gradual onset"])]),
        QuestionTree::build(&layout).unwrap(),
        RuleSet::new(),
    )
    .unwrap()
}

#[test]
fn respondent_confirms_requirements_and_denies_the_rest() {
    let state = shared_symptom_session().start();
    let respondent = Respondent::with_target("H1");

    assert_eq!(respondent.answer(&state, "s"), Answer::Yes);
    assert_eq!(respondent.answer(&state, "d1"), Answer::Yes);
    assert_eq!(respondent.answer(&state, "d2"), Answer::No);
}

#[test]
fn targetless_respondent_denies_everything() {
    let state = shared_symptom_session().start();
    let respondent = Respondent::without_target();

    for question in ["s", "d1", "d2"] {
        assert_eq!(respondent.answer(&state, question), Answer::No);
    }
}

#[test]
fn respondent_confirms_the_member_keeping_its_target() {
    let state = grouped_state();
    let respondent = Respondent::with_target("acute");
    let mut rng = StdRng::seed_from_u64(7);

    // confirming the other member would exclude the target
    let member = respondent.choose_member(&state, "onset", &mut rng).unwrap();
    assert_eq!(member, "sudden onset");
}

#[test]
fn targetless_respondent_still_confirms_some_member() {
    let state = grouped_state();
    let respondent = Respondent::without_target();
    let mut rng = StdRng::seed_from_u64(7);

    let member = respondent.choose_member(&state, "onset", &mut rng).unwrap();
    assert!(member == "sudden onset" || member == "gradual onset");
}

#[test]
fn undeclared_groups_are_rejected() {
    let state = grouped_state();
    let respondent = Respondent::without_target();
    let mut rng = StdRng::seed_from_u64(7);

    let err = respondent
        .choose_member(&state, "no such group", &mut rng)
        .unwrap_err();
    assert!(matches!(
        err,
        AnamnesisError::Interview(InterviewError::UnknownGroup { .. })
    ));
}

#[test]
fn training_prefers_discriminating_questions() {
    let trainer = Trainer::new(shared_symptom_session()).with_config(TrainerConfig {
        epochs: 3_000,
        seed: 120,
        report_every: 1_000,
    });
    let result = trainer.train().unwrap();

    // asking the shared symptom never eliminates anything, so both
    // discriminators must come out ahead of it
    let shared = result.values.value_of(&Action::question("s"));
    assert!(result.values.value_of(&Action::question("d1")) > shared);
    assert!(result.values.value_of(&Action::question("d2")) > shared);
}

#[test]
fn trained_policy_identifies_every_target() {
    let trainer = Trainer::new(shared_symptom_session()).with_config(TrainerConfig {
        epochs: 2_000,
        seed: 120,
        report_every: 1_000,
    });
    let result = trainer.train().unwrap();

    let mut rng = StdRng::seed_from_u64(120);
    let report = evaluate_policy(trainer.session(), &result.values, &mut rng).unwrap();

    // both targets recovered plus a clean no-hypothesis run
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.hit_rate(), 1.0);
    assert!(report.average_questions() <= 3.0);
}

#[test]
fn learned_values_round_trip_through_disk() {
    let trainer = Trainer::new(shared_symptom_session()).with_config(TrainerConfig {
        epochs: 500,
        seed: 120,
        report_every: 1_000,
    });
    let result = trainer.train().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("question_values.json");
    result.values.save(&path).unwrap();

    let restored = ValueTable::load(&path).unwrap();
    assert_eq!(restored.to_flat_map(), result.values.to_flat_map());
}
