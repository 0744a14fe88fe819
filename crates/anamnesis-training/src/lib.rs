//! Monte Carlo training of interview policies.
//!
//! The interview engine breaks ties by declaration order until a value
//! table says otherwise. This crate learns such a table: simulated
//! respondents answer on behalf of each catalog hypothesis while an
//! off-policy Monte Carlo control loop scores every action by how fast
//! the rest of the interview narrowed the field after taking it.

pub mod evaluation;
pub mod respondent;
pub mod trainer;

pub use evaluation::{evaluate_policy, EvaluationReport, TargetOutcome};
pub use respondent::Respondent;
pub use trainer::{Trainer, TrainerConfig, TrainingResult};
