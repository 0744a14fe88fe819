//! # anamnesis-core
//!
//! Foundation crate for the anamnesis interview engine.
//! Defines the hypothesis catalog, the evidence map, interview actions and
//! their learned value table, the error enums, and the shared constants.
//! Every other crate in the workspace depends on this.

pub mod action;
pub mod catalog;
pub mod constants;
pub mod errors;
pub mod evidence;

// Re-export the most commonly used types at the crate root.
pub use action::{Action, ActionKind, ValueTable};
pub use catalog::{Catalog, Hypothesis};
pub use errors::{AnamnesisError, AnamnesisResult};
pub use evidence::{Answer, EvidenceMap};
