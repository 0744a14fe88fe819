use thiserror::Error;

/// Question tree construction failures.
///
/// A well-formed tree places every question and every group exactly once;
/// a duplicate placement also covers the cyclic case, since a branch that
/// loops back must re-place a question already in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("question \"{question}\" is placed more than once in the tree")]
    DuplicateQuestionPlacement { question: String },

    #[error("group \"{group}\" is placed more than once in the tree")]
    DuplicateGroupPlacement { group: String },

    #[error("group \"{group}\" has no member questions")]
    EmptyGroup { group: String },
}
