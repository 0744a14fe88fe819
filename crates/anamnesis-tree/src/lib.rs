//! # anamnesis-tree
//!
//! The question scope hierarchy: a flat declarative layout compiled into
//! an arena tree where every question and group is placed exactly once,
//! plus the catalog expansion that folds tree ancestry into hypothesis
//! requirements.

pub mod arena;
pub mod expansion;
pub mod layout;

pub use arena::{GroupEntry, NodeId, QuestionTree};
pub use expansion::expand_catalog;
pub use layout::TreeLayout;
