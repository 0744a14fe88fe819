//! The rule set and its fixpoint closure.

use std::path::Path;

use anamnesis_core::errors::{AnamnesisResult, ContradictionError, StoreError};
use anamnesis_core::EvidenceMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AndRule, ContradictiveRule, GeneralSpecificRule, OrRule};

/// All inference rules of one interview domain.
///
/// The wire form groups rules by kind under the keys `general_specific`,
/// `and`, `or`, and `contradictive`; absent kinds default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub general_specific: Vec<GeneralSpecificRule>,
    #[serde(rename = "and")]
    pub and_rules: Vec<AndRule>,
    #[serde(rename = "or")]
    pub or_rules: Vec<OrRule>,
    pub contradictive: Vec<ContradictiveRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> AnamnesisResult<Self> {
        let rules: RuleSet = serde_json::from_str(text).map_err(StoreError::from)?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> AnamnesisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(StoreError::from)?;
        Self::from_json_str(&text)
    }

    /// Drop the general-specific rules.
    ///
    /// Used when taxonomy edges are expressed through the question tree
    /// instead: catalog expansion folds ancestors into the positive lists,
    /// making the equivalent rules redundant.
    pub fn without_general_specific(mut self) -> Self {
        self.general_specific.clear();
        self
    }

    pub fn rule_count(&self) -> usize {
        self.general_specific.len()
            + self.and_rules.len()
            + self.or_rules.len()
            + self.contradictive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }

    /// Drive `evidence` to its logical closure.
    ///
    /// Sweeps every rule repeatedly until a full sweep adds no fact. Each
    /// sweep either adds at least one fact or terminates the loop, so the
    /// closure finishes after at most one sweep per derivable fact.
    pub fn close(&self, evidence: &mut EvidenceMap) -> Result<(), ContradictionError> {
        let mut sweeps = 0usize;
        loop {
            let mut changed = false;
            for rule in &self.general_specific {
                changed |= rule.apply(evidence)?;
            }
            for rule in &self.and_rules {
                changed |= rule.apply(evidence)?;
            }
            for rule in &self.or_rules {
                changed |= rule.apply(evidence)?;
            }
            for rule in &self.contradictive {
                changed |= rule.apply(evidence)?;
            }
            sweeps += 1;
            if !changed {
                break;
            }
        }
        debug!(sweeps, facts = evidence.len(), "evidence closed");
        Ok(())
    }
}
