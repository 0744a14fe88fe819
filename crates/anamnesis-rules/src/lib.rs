//! # anamnesis-rules
//!
//! The inference layer of the interview engine: four rule kinds applied to
//! a fixpoint over the evidence map, and the append-only [`EvidenceLedger`]
//! that runs the closure after every recorded answer.
//!
//! ## Rule kinds
//! 1. **General-specific**: taxonomy edges; a false general falsifies its
//!    specifics, a true specific confirms its generals
//! 2. **And**: a parent question equivalent to the conjunction of its
//!    children
//! 3. **Or**: a parent question equivalent to the disjunction of its
//!    children
//! 4. **Contradictive**: two questions whose answers always oppose

pub mod conjunction;
pub mod contradictive;
pub mod disjunction;
pub mod general_specific;
pub mod ledger;
pub mod set;

pub use conjunction::AndRule;
pub use contradictive::ContradictiveRule;
pub use disjunction::OrRule;
pub use general_specific::GeneralSpecificRule;
pub use ledger::EvidenceLedger;
pub use set::RuleSet;
