//! Recorded answers and the facts derived from them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::ContradictionError;

/// A reply to a single question.
///
/// `Unknown` marks the question as asked without recording any fact, so
/// the session will not ask it again but no inference runs on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    Unknown,
}

impl Answer {
    /// The boolean fact this answer records, if any.
    pub fn as_fact(self) -> Option<bool> {
        match self {
            Answer::Yes => Some(true),
            Answer::No => Some(false),
            Answer::Unknown => None,
        }
    }

    pub fn from_fact(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// Boolean facts recorded per question id.
///
/// A key, once present, never changes value. Conflicting writes surface as
/// [`ContradictionError`] instead of overwriting, which is what makes the
/// evidence ledger append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceMap {
    facts: FxHashMap<String, bool>,
}

impl EvidenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded value for `question`, if any.
    pub fn get(&self, question: &str) -> Option<bool> {
        self.facts.get(question).copied()
    }

    pub fn contains(&self, question: &str) -> bool {
        self.facts.contains_key(question)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.facts.iter().map(|(q, v)| (q.as_str(), *v))
    }

    /// Record a forced value.
    ///
    /// Returns whether the map changed. Re-forcing the recorded value is a
    /// no-op; forcing the opposite value is a contradiction, never an
    /// overwrite.
    pub fn force(&mut self, question: &str, value: bool) -> Result<bool, ContradictionError> {
        match self.facts.get(question) {
            Some(existing) if *existing == value => Ok(false),
            Some(_) => Err(ContradictionError::new(question, self.clone())),
            None => {
                self.facts.insert(question.to_string(), value);
                Ok(true)
            }
        }
    }
}
