//! Interview state machine tests.

use anamnesis_core::errors::{AnamnesisError, InterviewError};
use anamnesis_core::{Action, Answer, Catalog, Hypothesis, ValueTable};
use anamnesis_engine::{make_initial, InterviewState, NextStep};
use anamnesis_rules::{AndRule, OrRule, RuleSet};
use anamnesis_tree::{QuestionTree, TreeLayout};

fn catalog(entries: &[(&str, &[&str], &[&str])]) -> Catalog {
    Catalog::new(
        entries
            .iter()
            .map(|(name, positives, negatives)| Hypothesis {
                name: name.to_string(),
                positive_questions: positives.iter().map(|q| q.to_string()).collect(),
                negative_questions: negatives.iter().map(|q| q.to_string()).collect(),
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

fn two_hypothesis_state() -> InterviewState {
    make_initial(
        catalog(&[("H1", &["q1", "q2"], &[]), ("H2", &["q1", "q3"], &[])]),
        flat_tree(&["q1", "q2", "q3"]),
        RuleSet::new(),
    )
    .unwrap()
}

#[test]
fn confirming_both_requirements_singles_out_the_first_hypothesis() {
    let state = two_hypothesis_state()
        .step("q1", Answer::Yes)
        .unwrap()
        .step("q2", Answer::Yes)
        .unwrap();
    assert_eq!(state.guess(), vec!["H1"]);
}

#[test]
fn refuting_one_branch_redirects_to_the_other() {
    let state = two_hypothesis_state()
        .step("q1", Answer::Yes)
        .unwrap()
        .step("q2", Answer::No)
        .unwrap()
        .step("q3", Answer::Yes)
        .unwrap();
    assert_eq!(state.guess(), vec!["H2"]);
    assert_eq!(state.verdict(), NextStep::Guess);
}

#[test]
fn refuting_the_shared_requirement_leaves_no_guess() {
    let state = two_hypothesis_state().step("q1", Answer::No).unwrap();
    assert_eq!(state.guess(), Vec::<String>::new());
    assert_eq!(state.verdict(), NextStep::Guess);
    assert!(state.ask_or_none().is_none());
}

#[test]
fn states_are_immutable_snapshots() {
    let base = two_hypothesis_state();
    let yes = base.step("q1", Answer::Yes).unwrap();
    let no = base.step("q1", Answer::No).unwrap();

    assert!(base.evidence().is_empty());
    assert_eq!(base.asked_count(), 0);
    assert_eq!(yes.evidence().get("q1"), Some(true));
    assert_eq!(no.evidence().get("q1"), Some(false));
    assert_eq!(yes.possible_guesses(), vec!["H1", "H2"]);
    assert!(no.possible_guesses().is_empty());
}

#[test]
fn skipping_marks_the_question_spent_without_evidence() {
    let base = two_hypothesis_state();
    let skipped = base.step("q1", Answer::Unknown).unwrap();

    assert!(skipped.evidence().is_empty());
    assert!(skipped.was_asked("q1"));
    assert_eq!(skipped.possible_guesses(), vec!["H1", "H2"]);
    assert!(!skipped
        .relevant_actions()
        .contains(&Action::question("q1")));
}

#[test]
fn yes_outside_the_current_scope_is_a_contract_violation() {
    let err = two_hypothesis_state().step("q9", Answer::Yes).unwrap_err();
    assert!(matches!(
        err,
        AnamnesisError::Interview(InterviewError::UnknownQuestion { .. })
    ));
}

#[test]
fn no_answers_never_move_the_scope() {
    let state = two_hypothesis_state().step("q1", Answer::No).unwrap();
    assert!(state.scope_question().is_none());
}

fn grouped_state() -> InterviewState {
    let layout = TreeLayout::from_json_str(
        r#"{
            "general_questions": ["fever"],
            "general_groups": ["onset"],
            "group_questions": [
                {"group": "onset", "question": "sudden onset"},
                {"group": "onset", "question": "gradual onset"}
            ]
        }"#,
    )
    .unwrap();
    make_initial(
        catalog(&[
            ("acute", &["sudden onset"], &[]),
            ("chronic", &["gradual onset"], &[]),
            ("febrile", &["fever"], &[]),
        ]),
        QuestionTree::build(&layout).unwrap(),
        RuleSet::new(),
    )
    .unwrap()
}

#[test]
fn confirming_a_group_member_excludes_its_siblings() {
    let state = grouped_state().step("sudden onset", Answer::Yes).unwrap();

    assert_eq!(state.evidence().get("sudden onset"), Some(true));
    assert_eq!(state.evidence().get("gradual onset"), Some(false));
    assert_eq!(state.asked_count(), 1);
    assert!(!state.possible_guesses().contains(&"chronic"));
}

#[test]
fn entered_groups_are_not_offered_again() {
    let state = grouped_state().step("sudden onset", Answer::Yes).unwrap();
    // the member scope is empty, so the interview is back at the root
    assert_eq!(state.relevant_actions(), vec![Action::question("fever")]);
}

#[test]
fn group_actions_surface_before_being_entered() {
    let actions = grouped_state().relevant_actions();
    assert_eq!(
        actions,
        vec![Action::question("fever"), Action::group("onset")]
    );
}

#[test]
fn exhausted_scopes_backtrack_to_broader_topics() {
    let layout = TreeLayout::from_json_str(
        r#"{
            "general_questions": ["joint pain", "rash"],
            "question_branches": [
                {"question": "joint pain", "child_question": "knee pain"}
            ]
        }"#,
    )
    .unwrap();
    let state = make_initial(
        catalog(&[("arthritis", &["knee pain"], &[]), ("eczema", &["rash"], &[])]),
        QuestionTree::build(&layout).unwrap(),
        RuleSet::new(),
    )
    .unwrap();

    let inside = state.step("joint pain", Answer::Yes).unwrap();
    assert_eq!(inside.scope_question(), Some("joint pain"));
    assert_eq!(inside.relevant_actions(), vec![Action::question("knee pain")]);

    // refuting the only question in scope surfaces back to the root
    let surfaced = inside.step("knee pain", Answer::No).unwrap();
    assert!(surfaced.scope_question().is_none());
    assert_eq!(surfaced.relevant_actions(), vec![Action::question("rash")]);
}

#[test]
fn single_survivor_without_supporting_evidence_keeps_asking() {
    let state = make_initial(
        catalog(&[("lonely", &["q1"], &[])]),
        flat_tree(&["q1"]),
        RuleSet::new(),
    )
    .unwrap();

    assert_eq!(state.verdict(), NextStep::Ask);
    let confirmed = state.step("q1", Answer::Yes).unwrap();
    assert_eq!(confirmed.verdict(), NextStep::Guess);
    assert_eq!(confirmed.guess(), vec!["lonely"]);
}

#[test]
fn question_budget_forces_a_guess() {
    let shared: Vec<String> = (0..30).map(|i| format!("s{i}")).collect();
    let shared_refs: Vec<&str> = shared.iter().map(|s| s.as_str()).collect();
    let mut wider = shared.clone();
    wider.push("extra".to_string());

    let entries = vec![
        Hypothesis {
            name: "narrow".to_string(),
            positive_questions: shared.clone(),
            negative_questions: Vec::new(),
        },
        Hypothesis {
            name: "wide".to_string(),
            positive_questions: wider,
            negative_questions: Vec::new(),
        },
    ];
    let mut state = make_initial(
        Catalog::new(entries).unwrap(),
        flat_tree(&shared_refs),
        RuleSet::new(),
    )
    .unwrap();

    let mut steps = 0;
    while state.verdict() == NextStep::Ask {
        let action = state.ask().unwrap();
        state = state.step(&action.id, Answer::Yes).unwrap();
        steps += 1;
        assert!(steps <= 25, "session must terminate within the budget");
    }
    assert_eq!(state.asked_count(), 25);
    assert_eq!(state.possible_guesses(), vec!["narrow", "wide"]);
}

#[test]
fn conjunction_children_are_relevant_for_their_parent() {
    let rules = RuleSet {
        and_rules: vec![AndRule::new(
            "aura",
            vec!["flicker".to_string(), "numbness".to_string()],
        )],
        ..RuleSet::default()
    };
    let state = make_initial(
        catalog(&[("migraine", &["aura"], &[])]),
        flat_tree(&["flicker", "numbness"]),
        rules,
    )
    .unwrap();

    assert_eq!(
        state.relevant_actions(),
        vec![Action::question("flicker"), Action::question("numbness")]
    );

    // once both children are confirmed the closure settles the parent
    let confirmed = state
        .step("flicker", Answer::Yes)
        .unwrap()
        .step("numbness", Answer::Yes)
        .unwrap();
    assert_eq!(confirmed.evidence().get("aura"), Some(true));
    assert_eq!(confirmed.verdict(), NextStep::Guess);
    assert_eq!(confirmed.guess(), vec!["migraine"]);
}

#[test]
fn disjunction_children_are_relevant_for_their_parent() {
    let rules = RuleSet {
        or_rules: vec![OrRule::new("pain", vec!["arm pain".to_string()])],
        ..RuleSet::default()
    };
    let state = make_initial(
        catalog(&[("strain", &["pain"], &[]), ("cold", &["sniffles"], &[])]),
        flat_tree(&["arm pain", "sniffles"]),
        rules,
    )
    .unwrap();

    assert!(state.relevant_actions().contains(&Action::question("arm pain")));
}

#[test]
fn answered_rule_parents_stop_unlocking_their_children() {
    let rules = RuleSet {
        and_rules: vec![AndRule::new(
            "aura",
            vec!["flicker".to_string(), "numbness".to_string()],
        )],
        ..RuleSet::default()
    };
    let state = make_initial(
        catalog(&[("migraine", &["aura"], &[]), ("tension", &["tightness"], &[])]),
        flat_tree(&["aura", "flicker", "tightness"]),
        rules,
    )
    .unwrap();

    // refuting the parent settles it; its children stop being relevant
    let refuted = state.step("aura", Answer::No).unwrap();
    assert_eq!(refuted.relevant_actions(), vec![Action::question("tightness")]);
}

#[test]
fn ask_prefers_the_highest_valued_action() {
    let state = two_hypothesis_state();
    assert_eq!(state.ask().unwrap(), Action::question("q1"));

    let mut values = ValueTable::new();
    values.set(Action::question("q3"), 0.5);
    assert_eq!(state.ask_scored(&values).unwrap(), Action::question("q3"));

    // ties keep declaration order
    values.set(Action::question("q2"), 0.5);
    assert_eq!(state.ask_scored(&values).unwrap(), Action::question("q2"));
}

#[test]
fn asking_with_nothing_relevant_is_a_contract_violation() {
    let state = make_initial(
        catalog(&[("unreachable", &["off tree"], &[])]),
        flat_tree(&["q1"]),
        RuleSet::new(),
    )
    .unwrap();

    assert_eq!(state.verdict(), NextStep::Guess);
    let err = state.ask().unwrap_err();
    assert!(matches!(
        err,
        AnamnesisError::Interview(InterviewError::NoRelevantAction)
    ));
}

#[test]
fn contradictions_inside_step_are_fatal() {
    // both hypotheses share an AND parent; forcing its child to clash
    let rules = RuleSet {
        and_rules: vec![AndRule::new("aura", vec!["flicker".to_string()])],
        ..RuleSet::default()
    };
    let state = make_initial(
        catalog(&[("migraine", &["aura"], &[]), ("other", &["flicker"], &[])]),
        flat_tree(&["aura", "flicker"]),
        rules,
    )
    .unwrap();

    let confirmed = state.step("aura", Answer::Yes).unwrap();
    assert_eq!(confirmed.evidence().get("flicker"), Some(true));
    let err = confirmed.step("flicker", Answer::No).unwrap_err();
    assert!(matches!(err, AnamnesisError::Contradiction(_)));
}
