//! Taxonomy edges between general and specific questions.

use anamnesis_core::errors::ContradictionError;
use anamnesis_core::EvidenceMap;
use serde::{Deserialize, Serialize};

/// Links broad questions to the narrower questions they subsume.
///
/// Inference runs in both directions: a general answered false rules out
/// every specific, and a specific answered true confirms every general.
/// A general answered true says nothing about its specifics, and a false
/// specific says nothing about its generals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSpecificRule {
    pub general_questions: Vec<String>,
    pub specific_questions: Vec<String>,
}

impl GeneralSpecificRule {
    pub fn new<G, S>(general_questions: G, specific_questions: S) -> Self
    where
        G: IntoIterator<Item = String>,
        S: IntoIterator<Item = String>,
    {
        Self {
            general_questions: general_questions.into_iter().collect(),
            specific_questions: specific_questions.into_iter().collect(),
        }
    }

    /// One inference pass. Returns whether any fact was added.
    pub fn apply(&self, evidence: &mut EvidenceMap) -> Result<bool, ContradictionError> {
        let mut changed = false;

        if self
            .general_questions
            .iter()
            .any(|q| evidence.get(q) == Some(false))
        {
            for specific in &self.specific_questions {
                changed |= evidence.force(specific, false)?;
            }
        }

        if self
            .specific_questions
            .iter()
            .any(|q| evidence.get(q) == Some(true))
        {
            for general in &self.general_questions {
                changed |= evidence.force(general, true)?;
            }
        }

        Ok(changed)
    }
}
