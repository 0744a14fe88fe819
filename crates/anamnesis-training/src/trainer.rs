//! Off-policy Monte Carlo control over interview episodes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anamnesis_core::errors::AnamnesisResult;
use anamnesis_core::{Action, ActionKind, Answer, ValueTable};
use anamnesis_engine::{InterviewSession, InterviewState, NextStep};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::info;

use crate::respondent::Respondent;

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Episodes to play.
    pub epochs: usize,
    /// Seed for respondents and exploration; fixed for reproducible runs.
    pub seed: u64,
    /// Progress log cadence, in epochs.
    pub report_every: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 5_000,
            seed: 120,
            report_every: 500,
        }
    }
}

/// Product of a finished training run.
#[derive(Debug)]
pub struct TrainingResult {
    pub values: ValueTable,
    pub episodes: usize,
    pub elapsed: Duration,
}

struct EpisodeStep {
    state: InterviewState,
    action: Action,
    reward: f64,
}

/// Learns a [`ValueTable`] over interview actions.
///
/// Episodes are played against simulated respondents under an
/// epsilon-greedy behavior policy whose exploration decays
/// quadratically over the run. Rewards follow elimination speed: a step
/// scores `-(surviving - 1) / (previous - 1)`, so an answer that rules
/// nothing out costs a full unit and one that settles the field is
/// free. Every-visit weighted importance sampling then folds each
/// episode into the value of the greedy policy.
pub struct Trainer {
    session: Arc<InterviewSession>,
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(session: InterviewSession) -> Self {
        Self {
            session: Arc::new(session),
            config: TrainerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TrainerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &Arc<InterviewSession> {
        &self.session
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the configured number of episodes and return the learned
    /// action values.
    pub fn train(&self) -> AnamnesisResult<TrainingResult> {
        let started = Instant::now();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut values = ValueTable::new();
        let mut visit_weights: FxHashMap<Action, f64> = FxHashMap::default();

        let names: Vec<String> = self
            .session
            .catalog()
            .iter()
            .map(|h| h.name.clone())
            .collect();

        for epoch in 0..self.config.epochs {
            let progress = epoch as f64 / self.config.epochs as f64;
            let epsilon = (1.0 - progress).powi(2);

            // one extra slot in the draw stands for "nothing fits"
            let respondent = if rng.gen::<f64>() >= 1.0 / (names.len() as f64 + 1.0) {
                Respondent::with_target(names[rng.gen_range(0..names.len())].clone())
            } else {
                Respondent::without_target()
            };

            let steps = self.play_episode(&respondent, &values, epsilon, &mut rng)?;
            backpropagate(&steps, &mut values, &mut visit_weights, epsilon);

            if (epoch + 1) % self.config.report_every == 0 {
                info!(
                    epoch = epoch + 1,
                    actions = values.len(),
                    epsilon,
                    "training progress"
                );
            }
        }

        let result = TrainingResult {
            values,
            episodes: self.config.epochs,
            elapsed: started.elapsed(),
        };
        info!(
            episodes = result.episodes,
            actions = result.values.len(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "training finished"
        );
        Ok(result)
    }

    /// Play one interview to its verdict, recording every step taken.
    fn play_episode(
        &self,
        respondent: &Respondent,
        values: &ValueTable,
        epsilon: f64,
        rng: &mut StdRng,
    ) -> AnamnesisResult<Vec<EpisodeStep>> {
        let mut state = InterviewState::initial(Arc::clone(&self.session));
        let mut steps = Vec::new();

        while state.verdict() == NextStep::Ask {
            let action = if rng.gen::<f64>() > epsilon {
                state.ask_scored(values)?
            } else {
                let mut relevant = state.relevant_actions();
                relevant.swap_remove(rng.gen_range(0..relevant.len()))
            };

            let (question, answer) = match action.kind {
                ActionKind::Question => {
                    (action.id.clone(), respondent.answer(&state, &action.id))
                }
                ActionKind::Group => (
                    respondent.choose_member(&state, &action.id, rng)?,
                    Answer::Yes,
                ),
            };
            let next = state.step(&question, answer)?;

            let before = state.possible_guesses().len();
            let after = next.possible_guesses().len();
            let reward = if before > 1 {
                -((after.max(1) - 1) as f64) / (before - 1) as f64
            } else {
                0.0
            };

            steps.push(EpisodeStep { state, action, reward });
            state = next;
        }

        Ok(steps)
    }
}

/// Weighted-importance-sampling backward pass.
///
/// Rewards fold tail-first into the return, and each visited action's
/// value moves toward it by its weight share. The walk stops after the
/// first step where the live greedy policy disagrees with the action
/// taken: everything earlier has probability zero under the greedy
/// target policy. Until then the weight grows by the inverse behavior
/// probability `(1 - eps) + eps / |relevant|`.
fn backpropagate(
    steps: &[EpisodeStep],
    values: &mut ValueTable,
    visit_weights: &mut FxHashMap<Action, f64>,
    epsilon: f64,
) {
    let mut episode_return = 0.0f64;
    let mut weight = 1.0f64;

    for step in steps.iter().rev() {
        episode_return += step.reward;

        let visits = visit_weights.entry(step.action.clone()).or_insert(0.0);
        *visits += weight;
        let old = values.value_of(&step.action);
        values.set(
            step.action.clone(),
            old + (weight / *visits) * (episode_return - old),
        );

        match step.state.ask_scored(values) {
            Ok(greedy) if greedy == step.action => {}
            _ => break,
        }

        let branching = step.state.relevant_actions().len();
        weight /= (1.0 - epsilon) + epsilon / branching as f64;
    }
}
