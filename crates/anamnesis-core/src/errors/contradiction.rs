use thiserror::Error;

use crate::evidence::EvidenceMap;

/// A forced evidence value conflicted with an already-recorded one.
///
/// Always fatal for the session: it signals an inconsistent rule set or
/// catalog, not a transient fault. The error carries the question that
/// triggered the conflict and a snapshot of the evidence at that moment
/// so the offending configuration can be diagnosed.
#[derive(Debug, Clone, Error)]
#[error("contradictory value forced for question \"{question}\" ({} facts recorded)", .evidence.len())]
pub struct ContradictionError {
    /// The question whose forced value conflicted.
    pub question: String,
    /// Snapshot of the evidence map at the moment of failure.
    pub evidence: EvidenceMap,
}

impl ContradictionError {
    pub fn new(question: impl Into<String>, evidence: EvidenceMap) -> Self {
        Self {
            question: question.into(),
            evidence,
        }
    }
}
