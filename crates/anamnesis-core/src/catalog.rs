//! The hypothesis catalog.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::constants::NO_HYPOTHESIS_LABEL;
use crate::errors::{AnamnesisResult, CatalogError, StoreError};

/// One candidate conclusion of an interview.
///
/// `positive_questions` must all end up true for the hypothesis to hold;
/// any true `negative_questions` disqualifies it outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub name: String,
    pub positive_questions: Vec<String>,
    #[serde(default)]
    pub negative_questions: Vec<String>,
}

/// Validated, ordered collection of hypotheses.
///
/// Declaration order is preserved and meaningful: guess ranking breaks
/// score ties by it. Construction checks every invariant eagerly, so a
/// catalog that exists is safe to interview against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    hypotheses: Vec<Hypothesis>,
}

impl Catalog {
    pub fn new(hypotheses: Vec<Hypothesis>) -> Result<Self, CatalogError> {
        if hypotheses.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = FxHashSet::default();
        for hypothesis in &hypotheses {
            if hypothesis.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if hypothesis.name == NO_HYPOTHESIS_LABEL {
                return Err(CatalogError::ReservedName {
                    name: hypothesis.name.clone(),
                });
            }
            if !seen.insert(hypothesis.name.as_str()) {
                return Err(CatalogError::DuplicateName {
                    name: hypothesis.name.clone(),
                });
            }
            if hypothesis.positive_questions.is_empty() {
                return Err(CatalogError::NoPositiveQuestions {
                    name: hypothesis.name.clone(),
                });
            }
        }
        Ok(Self { hypotheses })
    }

    pub fn from_json_str(text: &str) -> AnamnesisResult<Self> {
        let entries: Vec<Hypothesis> = serde_json::from_str(text).map_err(StoreError::from)?;
        Ok(Self::new(entries)?)
    }

    pub fn load(path: impl AsRef<Path>) -> AnamnesisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(StoreError::from)?;
        Self::from_json_str(&text)
    }

    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hypothesis> {
        self.hypotheses.iter()
    }
}
