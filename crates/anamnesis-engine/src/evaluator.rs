//! Hypothesis evaluation and coverage-ranked guessing.

use anamnesis_core::constants::MAX_GUESS_TIERS;
use anamnesis_core::{Catalog, EvidenceMap, Hypothesis};
use serde::Serialize;

/// Outcome of checking one hypothesis against the evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Some required fact is recorded with the wrong polarity.
    Impossible,
    /// No recorded fact disqualifies the hypothesis.
    Possible {
        /// Required questions answered with the expected polarity.
        answered: usize,
        /// Required questions with no recorded fact yet.
        unanswered: usize,
    },
}

impl Consistency {
    pub fn is_possible(self) -> bool {
        matches!(self, Consistency::Possible { .. })
    }
}

/// Check `hypothesis` against `evidence`.
///
/// A positive question counts as answered when true, a negative one when
/// false; the first fact recorded with the wrong polarity short-circuits
/// to `Impossible`.
pub fn evaluate(hypothesis: &Hypothesis, evidence: &EvidenceMap) -> Consistency {
    let mut answered = 0usize;
    let mut unanswered = 0usize;

    for question in &hypothesis.positive_questions {
        match evidence.get(question) {
            Some(true) => answered += 1,
            Some(false) => return Consistency::Impossible,
            None => unanswered += 1,
        }
    }
    for question in &hypothesis.negative_questions {
        match evidence.get(question) {
            Some(false) => answered += 1,
            Some(true) => return Consistency::Impossible,
            None => unanswered += 1,
        }
    }

    Consistency::Possible { answered, unanswered }
}

/// One entry of a ranked guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGuess {
    pub name: String,
    /// Share of the hypothesis' required questions already answered the
    /// expected way, in `(0.0, 1.0]`.
    pub score: f64,
}

/// Highest-coverage tier among hypotheses not in `taken`, with its score.
/// The tier is empty when only zero-coverage candidates remain.
fn next_tier<'a>(
    catalog: &'a Catalog,
    evidence: &EvidenceMap,
    taken: &[RankedGuess],
) -> (Vec<&'a str>, f64) {
    let mut tier: Vec<&str> = Vec::new();
    let mut tier_score = 0.0f64;

    for hypothesis in catalog.iter() {
        if taken.iter().any(|g| g.name == hypothesis.name) {
            continue;
        }
        let Consistency::Possible { answered, unanswered } = evaluate(hypothesis, evidence) else {
            continue;
        };
        let total = answered + unanswered;
        if total == 0 {
            continue;
        }
        let score = answered as f64 / total as f64;
        if score > tier_score {
            tier_score = score;
            tier.clear();
            tier.push(&hypothesis.name);
        } else if score == tier_score && score > 0.0 {
            tier.push(&hypothesis.name);
        }
    }

    (tier, tier_score)
}

/// Names in the single best-covered tier, in catalog order.
///
/// Empty when no hypothesis has supporting evidence, which reads as
/// "no hypothesis fits".
pub fn best_guesses(catalog: &Catalog, evidence: &EvidenceMap) -> Vec<String> {
    let (tier, _) = next_tier(catalog, evidence, &[]);
    tier.into_iter().map(str::to_string).collect()
}

/// Rank the hypotheses still possible under `evidence` by coverage.
///
/// Each pass extracts the highest-scoring remaining tier; ties share a
/// tier and keep catalog order. Ranking stops after [`MAX_GUESS_TIERS`]
/// tiers or as soon as only zero-coverage candidates remain, so a
/// session with no supporting evidence ranks nothing.
pub fn rank_guesses(catalog: &Catalog, evidence: &EvidenceMap) -> Vec<RankedGuess> {
    let mut ranked: Vec<RankedGuess> = Vec::new();

    for _ in 0..MAX_GUESS_TIERS {
        let (tier, tier_score) = next_tier(catalog, evidence, &ranked);
        if tier.is_empty() {
            break;
        }
        ranked.extend(tier.into_iter().map(|name| RankedGuess {
            name: name.to_string(),
            score: tier_score,
        }));
    }

    ranked
}
