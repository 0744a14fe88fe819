//! The append-only evidence ledger.

use std::sync::Arc;

use anamnesis_core::errors::ContradictionError;
use anamnesis_core::EvidenceMap;
use tracing::trace;

use crate::RuleSet;

/// Immutable evidence snapshot bound to a rule set.
///
/// Recording an answer produces a new ledger whose facts are the closure
/// of the old facts plus the answer; the old ledger stays valid, which is
/// what lets interview states branch cheaply for counterfactual probes.
#[derive(Debug, Clone)]
pub struct EvidenceLedger {
    facts: EvidenceMap,
    rules: Arc<RuleSet>,
}

impl EvidenceLedger {
    /// Empty ledger over `rules`.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            facts: EvidenceMap::new(),
            rules,
        }
    }

    /// Ledger seeded with `facts`, closed immediately.
    pub fn with_facts(rules: Arc<RuleSet>, mut facts: EvidenceMap) -> Result<Self, ContradictionError> {
        rules.close(&mut facts)?;
        Ok(Self { facts, rules })
    }

    pub fn facts(&self) -> &EvidenceMap {
        &self.facts
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Record one answered question and return the advanced ledger.
    ///
    /// Re-recording the value already known for `question` returns an
    /// equivalent ledger unchanged; recording the opposite value fails
    /// with a contradiction carrying the current facts.
    pub fn advance(&self, question: &str, answer: bool) -> Result<Self, ContradictionError> {
        if let Some(existing) = self.facts.get(question) {
            if existing == answer {
                return Ok(self.clone());
            }
            return Err(ContradictionError::new(question, self.facts.clone()));
        }

        let mut facts = self.facts.clone();
        facts.force(question, answer)?;
        self.rules.close(&mut facts)?;
        trace!(question, answer, facts = facts.len(), "ledger advanced");

        Ok(Self {
            facts,
            rules: Arc::clone(&self.rules),
        })
    }
}
