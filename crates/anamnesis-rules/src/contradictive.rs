//! Contradictive rules: question pairs with opposing answers.

use anamnesis_core::errors::ContradictionError;
use anamnesis_core::EvidenceMap;
use serde::{Deserialize, Serialize};

/// Declares that `first_question` and `second_question` always hold
/// opposite truth values, so knowing either one determines the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContradictiveRule {
    pub first_question: String,
    pub second_question: String,
}

impl ContradictiveRule {
    pub fn new(first_question: impl Into<String>, second_question: impl Into<String>) -> Self {
        Self {
            first_question: first_question.into(),
            second_question: second_question.into(),
        }
    }

    /// One inference pass. Returns whether any fact was added.
    pub fn apply(&self, evidence: &mut EvidenceMap) -> Result<bool, ContradictionError> {
        let mut changed = false;

        if let Some(value) = evidence.get(&self.first_question) {
            changed |= evidence.force(&self.second_question, !value)?;
        }
        if let Some(value) = evidence.get(&self.second_question) {
            changed |= evidence.force(&self.first_question, !value)?;
        }

        Ok(changed)
    }
}
