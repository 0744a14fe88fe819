//! Disjunction rules: a parent question defined as the OR of its children.

use anamnesis_core::errors::ContradictionError;
use anamnesis_core::EvidenceMap;
use serde::{Deserialize, Serialize};

/// Declares `parent_question` logically equivalent to the disjunction of
/// `child_questions`. The exact dual of [`crate::AndRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrRule {
    pub parent_question: String,
    pub child_questions: Vec<String>,
}

impl OrRule {
    pub fn new<C>(parent_question: impl Into<String>, child_questions: C) -> Self
    where
        C: IntoIterator<Item = String>,
    {
        Self {
            parent_question: parent_question.into(),
            child_questions: child_questions.into_iter().collect(),
        }
    }

    /// One inference pass. Returns whether any fact was added.
    pub fn apply(&self, evidence: &mut EvidenceMap) -> Result<bool, ContradictionError> {
        let mut changed = false;

        // A false parent falsifies every child.
        if evidence.get(&self.parent_question) == Some(false) {
            for child in &self.child_questions {
                changed |= evidence.force(child, false)?;
            }
        }

        // Any true child confirms the parent.
        let any_true = self
            .child_questions
            .iter()
            .any(|c| evidence.get(c) == Some(true));
        if any_true {
            changed |= evidence.force(&self.parent_question, true)?;
        }

        // All children false falsifies the parent.
        if !self.child_questions.is_empty()
            && self
                .child_questions
                .iter()
                .all(|c| evidence.get(c) == Some(false))
        {
            changed |= evidence.force(&self.parent_question, false)?;
        }

        // A true parent with exactly one undetermined child pins that
        // child true, but only while no child explains the truth yet.
        if evidence.get(&self.parent_question) == Some(true) && !any_true {
            let mut undetermined = self
                .child_questions
                .iter()
                .filter(|c| evidence.get(c).is_none());
            if let (Some(last), None) = (undetermined.next(), undetermined.next()) {
                changed |= evidence.force(last, true)?;
            }
        }

        Ok(changed)
    }
}
