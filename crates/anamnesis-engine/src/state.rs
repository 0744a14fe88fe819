//! Immutable interview state snapshots.

use std::sync::Arc;

use anamnesis_core::constants::QUESTION_LIMIT;
use anamnesis_core::errors::{AnamnesisResult, InterviewError};
use anamnesis_core::{Action, Answer, EvidenceMap, Hypothesis, ValueTable};
use anamnesis_rules::EvidenceLedger;
use anamnesis_tree::NodeId;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::evaluator::{best_guesses, evaluate, rank_guesses, Consistency, RankedGuess};
use crate::session::InterviewSession;

/// What the session should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Keep interviewing; `ask` will yield an action.
    Ask,
    /// Stop and produce the ranked guesses.
    Guess,
}

/// One snapshot of a running interview.
///
/// Snapshots are immutable: recording an answer returns the successor and
/// leaves the original intact, so counterfactual probes and training
/// replays can branch from any point without interference.
#[derive(Debug, Clone)]
pub struct InterviewState {
    session: Arc<InterviewSession>,
    ledger: EvidenceLedger,
    node: NodeId,
    asked: FxHashSet<String>,
}

impl InterviewState {
    /// Opening state: no evidence, no questions spent, scope at the root.
    pub fn initial(session: Arc<InterviewSession>) -> Self {
        let ledger = EvidenceLedger::new(Arc::clone(session.rules()));
        let node = session.tree().root();
        Self {
            session,
            ledger,
            node,
            asked: FxHashSet::default(),
        }
    }

    pub fn session(&self) -> &Arc<InterviewSession> {
        &self.session
    }

    pub fn evidence(&self) -> &EvidenceMap {
        self.ledger.facts()
    }

    pub fn asked_count(&self) -> usize {
        self.asked.len()
    }

    pub fn was_asked(&self, question: &str) -> bool {
        self.asked.contains(question)
    }

    /// Question whose scope the interview currently sits in; `None` at
    /// the root.
    pub fn scope_question(&self) -> Option<&str> {
        self.session.tree().question(self.node)
    }

    /// Decide whether to keep asking or to stop and guess.
    ///
    /// Guessing wins once the question budget is spent, once at most one
    /// hypothesis survives and every survivor has some supporting answer,
    /// or once nothing relevant is left to ask anywhere in scope.
    pub fn verdict(&self) -> NextStep {
        if self.asked.len() >= QUESTION_LIMIT {
            return NextStep::Guess;
        }

        let facts = self.ledger.facts();
        let possible = self.possible_hypotheses();
        if possible.len() <= 1
            && possible.iter().all(|h| {
                matches!(
                    evaluate(h, facts),
                    Consistency::Possible { answered, .. } if answered > 0
                )
            })
        {
            return NextStep::Guess;
        }

        if self.relevant_actions().is_empty() {
            return NextStep::Guess;
        }
        NextStep::Ask
    }

    fn possible_hypotheses(&self) -> Vec<&Hypothesis> {
        let facts = self.ledger.facts();
        self.session
            .catalog()
            .iter()
            .filter(|h| evaluate(h, facts).is_possible())
            .collect()
    }

    /// Names of the hypotheses still consistent with the evidence, in
    /// catalog order.
    pub fn possible_guesses(&self) -> Vec<&str> {
        self.possible_hypotheses()
            .into_iter()
            .map(|h| h.name.as_str())
            .collect()
    }

    /// Unspent actions at the current scope that can still move some
    /// possible hypothesis.
    pub fn relevant_actions(&self) -> Vec<Action> {
        let tree = self.session.tree();
        let possible = self.possible_hypotheses();
        let mut actions = Vec::new();

        for &child in tree.children(self.node) {
            let Some(question) = tree.question(child) else {
                continue;
            };
            if self.asked.contains(question) {
                continue;
            }
            if possible
                .iter()
                .any(|h| self.involves(question, &h.positive_questions))
            {
                actions.push(Action::question(question));
            }
        }

        for entry in tree.groups_at(self.node) {
            let entered = entry
                .members()
                .iter()
                .filter_map(|&m| tree.question(m))
                .any(|q| self.asked.contains(q));
            if entered {
                continue;
            }
            let involved = entry
                .members()
                .iter()
                .filter_map(|&m| tree.question(m))
                .any(|q| possible.iter().any(|h| self.involves(q, &h.positive_questions)));
            if involved {
                actions.push(Action::group(entry.id()));
            }
        }

        actions
    }

    /// Can answering `question` bear on a hypothesis requiring `required`?
    ///
    /// True when the question is required directly, or when an and/or
    /// rule chain links it to an unanswered required question. Answered
    /// parents stop the descent: their value is settled, so nothing below
    /// them can move the hypothesis any more.
    fn involves(&self, question: &str, required: &[String]) -> bool {
        let mut visited = FxHashSet::default();
        self.involves_inner(question, required, &mut visited)
    }

    fn involves_inner(
        &self,
        question: &str,
        required: &[String],
        visited: &mut FxHashSet<String>,
    ) -> bool {
        if required.iter().any(|r| r == question) {
            return true;
        }

        let facts = self.ledger.facts();
        let rules = self.session.rules();
        for parent in required {
            if facts.contains(parent) {
                continue;
            }
            if !visited.insert(parent.clone()) {
                continue;
            }

            let mut has_and = false;
            for rule in &rules.and_rules {
                if rule.parent_question != *parent {
                    continue;
                }
                has_and = true;
                if self.involves_inner(question, &rule.child_questions, visited) {
                    return true;
                }
            }
            // a conjunctive definition is authoritative for its parent
            if has_and {
                continue;
            }
            for rule in &rules.or_rules {
                if rule.parent_question != *parent {
                    continue;
                }
                if self.involves_inner(question, &rule.child_questions, visited) {
                    return true;
                }
            }
        }
        false
    }

    /// Highest-valued relevant action under the session's value table.
    pub fn ask(&self) -> AnamnesisResult<Action> {
        self.ask_scored(self.session.values())
    }

    /// Highest-valued relevant action under an explicit value table.
    ///
    /// Ties break by declaration order: the first action seen at the top
    /// value wins, which keeps the greedy policy deterministic.
    pub fn ask_scored(&self, values: &ValueTable) -> AnamnesisResult<Action> {
        let mut best: Option<(Action, f64)> = None;
        for action in self.relevant_actions() {
            let value = values.value_of(&action);
            match &best {
                Some((_, top)) if value <= *top => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
            .ok_or_else(|| InterviewError::NoRelevantAction.into())
    }

    /// `ask`, with exhaustion folded to `None` for harness loops.
    pub fn ask_or_none(&self) -> Option<Action> {
        self.ask().ok()
    }

    /// Record one answered question and return the successor state.
    ///
    /// `Yes` on a question addressable from the current scope descends
    /// into it; inside a group the siblings are recorded `No` first,
    /// since members are mutually exclusive. `No` narrows the catalog
    /// without moving, and `Unknown` only marks the question as spent.
    /// Afterwards the scope ascends while nothing relevant remains in it.
    pub fn step(&self, question: &str, answer: Answer) -> AnamnesisResult<Self> {
        let tree = self.session.tree();
        let mut asked = self.asked.clone();
        asked.insert(question.to_string());

        let (ledger, node) = match answer {
            Answer::Unknown => (self.ledger.clone(), self.node),
            Answer::No => (self.ledger.advance(question, false)?, self.node),
            Answer::Yes => {
                if let Some(child) = tree.child_question(self.node, question) {
                    (self.ledger.advance(question, true)?, child)
                } else if let Some((entry, member)) = tree.member_question(self.node, question) {
                    let mut ledger = self.ledger.advance(question, true)?;
                    for &sibling in entry.members() {
                        let Some(sibling_question) = tree.question(sibling) else {
                            continue;
                        };
                        if sibling_question != question {
                            ledger = ledger.advance(sibling_question, false)?;
                        }
                    }
                    (ledger, member)
                } else {
                    return Err(InterviewError::UnknownQuestion {
                        question: question.to_string(),
                    }
                    .into());
                }
            }
        };

        let mut next = Self {
            session: Arc::clone(&self.session),
            ledger,
            node,
            asked,
        };

        // leave scopes with nothing relevant left in them
        while next.node != tree.root() && next.relevant_actions().is_empty() {
            let Some(parent) = tree.parent(next.node) else {
                break;
            };
            debug!(from = ?tree.question(next.node), "scope exhausted, ascending");
            next.node = parent;
        }

        Ok(next)
    }

    /// Names in the best-covered guess tier; empty when nothing fits.
    pub fn guess(&self) -> Vec<String> {
        best_guesses(self.session.catalog(), self.ledger.facts())
    }

    /// Scored guesses in up to three coverage tiers.
    pub fn guess_ranked(&self) -> Vec<RankedGuess> {
        rank_guesses(self.session.catalog(), self.ledger.facts())
    }
}
