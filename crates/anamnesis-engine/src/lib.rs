//! # anamnesis-engine
//!
//! The adaptive interview state machine: immutable state snapshots over a
//! shared session, relevance filtering through the rule graph, the
//! ask-or-guess verdict, and coverage-ranked guessing.

pub mod evaluator;
pub mod session;
pub mod state;

pub use evaluator::{best_guesses, evaluate, rank_guesses, Consistency, RankedGuess};
pub use session::{make_initial, InterviewSession};
pub use state::{InterviewState, NextStep};
