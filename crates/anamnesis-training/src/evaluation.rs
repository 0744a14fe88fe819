//! Greedy policy evaluation against simulated respondents.

use std::sync::Arc;

use anamnesis_core::constants::NO_HYPOTHESIS_LABEL;
use anamnesis_core::errors::AnamnesisResult;
use anamnesis_core::{ActionKind, Answer, ValueTable};
use anamnesis_engine::{InterviewSession, InterviewState, NextStep};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::respondent::Respondent;

/// Outcome of one simulated interview.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    /// Hypothesis the respondent embodied.
    pub target: String,
    pub questions_asked: usize,
    /// For real targets, whether the final guess named the target; for
    /// the no-hypothesis run, whether the guess came back empty.
    pub hit: bool,
    pub guesses: Vec<String>,
}

/// Outcomes for every catalog hypothesis plus the no-hypothesis run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl EvaluationReport {
    /// Share of runs whose guess was right, in `[0.0, 1.0]`.
    pub fn hit_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let hits = self.outcomes.iter().filter(|o| o.hit).count();
        hits as f64 / self.outcomes.len() as f64
    }

    /// Mean interview length across all runs.
    pub fn average_questions(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: usize = self.outcomes.iter().map(|o| o.questions_asked).sum();
        total as f64 / self.outcomes.len() as f64
    }
}

/// Interview the policy once per hypothesis, then once with no
/// underlying hypothesis at all.
pub fn evaluate_policy(
    session: &Arc<InterviewSession>,
    values: &ValueTable,
    rng: &mut StdRng,
) -> AnamnesisResult<EvaluationReport> {
    let names: Vec<String> = session
        .catalog()
        .iter()
        .map(|h| h.name.clone())
        .collect();
    let mut outcomes = Vec::with_capacity(names.len() + 1);

    for name in names {
        let respondent = Respondent::with_target(name.clone());
        let (guesses, questions_asked) = run_greedy(session, values, &respondent, rng)?;
        let hit = guesses.iter().any(|g| *g == name);
        debug!(target = %name, questions_asked, hit, "evaluation episode");
        outcomes.push(TargetOutcome {
            target: name,
            questions_asked,
            hit,
            guesses,
        });
    }

    let respondent = Respondent::without_target();
    let (guesses, questions_asked) = run_greedy(session, values, &respondent, rng)?;
    let hit = guesses.is_empty();
    debug!(questions_asked, hit, "no-hypothesis evaluation episode");
    outcomes.push(TargetOutcome {
        target: NO_HYPOTHESIS_LABEL.to_string(),
        questions_asked,
        hit,
        guesses,
    });

    Ok(EvaluationReport { outcomes })
}

/// One interview under the pure greedy policy.
fn run_greedy(
    session: &Arc<InterviewSession>,
    values: &ValueTable,
    respondent: &Respondent,
    rng: &mut StdRng,
) -> AnamnesisResult<(Vec<String>, usize)> {
    let mut state = InterviewState::initial(Arc::clone(session));
    let mut questions_asked = 0usize;

    while state.verdict() == NextStep::Ask {
        let action = state.ask_scored(values)?;
        let (question, answer) = match action.kind {
            ActionKind::Question => {
                (action.id.clone(), respondent.answer(&state, &action.id))
            }
            ActionKind::Group => (
                respondent.choose_member(&state, &action.id, rng)?,
                Answer::Yes,
            ),
        };
        state = state.step(&question, answer)?;
        questions_asked += 1;
    }

    Ok((state.guess(), questions_asked))
}
