//! Simulated respondents for training and evaluation episodes.

use anamnesis_core::errors::{AnamnesisResult, InterviewError};
use anamnesis_core::Answer;
use anamnesis_engine::InterviewState;
use rand::rngs::StdRng;
use rand::Rng;

/// Answers interview questions as if one catalog hypothesis were true.
///
/// The respondent carries no question list of its own. It answers by
/// probing the counterfactual next state: if saying "no" would eliminate
/// the target, the truthful answer must be "yes". Without a target every
/// question is denied, modelling a session where nothing in the catalog
/// fits.
#[derive(Debug, Clone)]
pub struct Respondent {
    target: Option<String>,
}

impl Respondent {
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
        }
    }

    pub fn without_target() -> Self {
        Self { target: None }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Truthful answer for `question` at `state`.
    pub fn answer(&self, state: &InterviewState, question: &str) -> Answer {
        let Some(target) = self.target.as_deref() else {
            return Answer::No;
        };
        match state.step(question, Answer::No) {
            Ok(denied) => {
                if denied.possible_guesses().iter().any(|name| *name == target) {
                    Answer::No
                } else {
                    Answer::Yes
                }
            }
            // denial contradicts the recorded evidence, so it holds
            Err(_) => Answer::Yes,
        }
    }

    /// Group member the respondent confirms when asked about `group`.
    ///
    /// Prefers a uniformly random member whose confirmation keeps the
    /// target possible; when none does, or without a target, any member
    /// serves.
    pub fn choose_member(
        &self,
        state: &InterviewState,
        group: &str,
        rng: &mut StdRng,
    ) -> AnamnesisResult<String> {
        let members = state
            .session()
            .tree()
            .members_of_group(group)
            .ok_or_else(|| InterviewError::UnknownGroup {
                group: group.to_string(),
            })?;

        if let Some(target) = self.target.as_deref() {
            let keeping: Vec<&str> = members
                .iter()
                .copied()
                .filter(|member| match state.step(member, Answer::Yes) {
                    Ok(confirmed) => {
                        confirmed.possible_guesses().iter().any(|name| *name == target)
                    }
                    Err(_) => false,
                })
                .collect();
            if !keeping.is_empty() {
                return Ok(keeping[rng.gen_range(0..keeping.len())].to_string());
            }
        }
        Ok(members[rng.gen_range(0..members.len())].to_string())
    }
}
