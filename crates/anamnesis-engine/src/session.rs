//! Interview session setup.

use std::sync::Arc;

use anamnesis_core::errors::AnamnesisResult;
use anamnesis_core::{Catalog, ValueTable};
use anamnesis_rules::RuleSet;
use anamnesis_tree::{expand_catalog, QuestionTree};
use tracing::debug;

use crate::state::InterviewState;

/// Immutable configuration shared by every state of one interview.
///
/// Construction expands the catalog over the tree once. States hold the
/// session behind an `Arc`, so taking a snapshot never copies the
/// catalog, rules, or tree.
#[derive(Debug)]
pub struct InterviewSession {
    catalog: Catalog,
    rules: Arc<RuleSet>,
    tree: QuestionTree,
    values: ValueTable,
}

impl InterviewSession {
    pub fn new(catalog: Catalog, tree: QuestionTree, rules: RuleSet) -> AnamnesisResult<Self> {
        let catalog = expand_catalog(&catalog, &tree)?;
        debug!(
            hypotheses = catalog.len(),
            rules = rules.rule_count(),
            nodes = tree.len(),
            "interview session prepared"
        );
        Ok(Self {
            catalog,
            rules: Arc::new(rules),
            tree,
            values: ValueTable::new(),
        })
    }

    /// Attach a trained value table to drive the greedy policy.
    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }

    /// The expanded catalog, ancestors folded in.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    pub fn tree(&self) -> &QuestionTree {
        &self.tree
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Wrap the session and produce the opening state.
    pub fn start(self) -> InterviewState {
        InterviewState::initial(Arc::new(self))
    }
}

/// Build a session and return its opening state in one call.
pub fn make_initial(
    catalog: Catalog,
    tree: QuestionTree,
    rules: RuleSet,
) -> AnamnesisResult<InterviewState> {
    Ok(InterviewSession::new(catalog, tree, rules)?.start())
}
