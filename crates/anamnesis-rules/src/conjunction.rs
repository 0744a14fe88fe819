//! Conjunction rules: a parent question defined as the AND of its children.

use anamnesis_core::errors::ContradictionError;
use anamnesis_core::EvidenceMap;
use serde::{Deserialize, Serialize};

/// Declares `parent_question` logically equivalent to the conjunction of
/// `child_questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndRule {
    pub parent_question: String,
    pub child_questions: Vec<String>,
}

impl AndRule {
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

        // A true parent confirms every child.
        if evidence.get(&self.parent_question) == Some(true) {
            for child in &self.child_questions {
                changed |= evidence.force(child, true)?;
            }
        }

        // Any false child falsifies the parent.
        let any_false = self
            .child_questions
            .iter()
            .any(|c| evidence.get(c) == Some(false));
        if any_false {
            changed |= evidence.force(&self.parent_question, false)?;
        }

        // All children true confirms the parent.
        if !self.child_questions.is_empty()
            && self
                .child_questions
                .iter()
                .all(|c| evidence.get(c) == Some(true))
        {
            changed |= evidence.force(&self.parent_question, true)?;
        }

        // A false parent with exactly one undetermined child pins that
        // child false, but only while no child explains the falseness yet.
        if evidence.get(&self.parent_question) == Some(false) && !any_false {
            let mut undetermined = self
                .child_questions
                .iter()
                .filter(|c| evidence.get(c).is_none());
            if let (Some(last), None) = (undetermined.next(), undetermined.next()) {
                changed |= evidence.force(last, false)?;
            }
        }

        Ok(changed)
    }
}
