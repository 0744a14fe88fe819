use thiserror::Error;

/// Caller-contract violations of the interview state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewError {
    /// `ask` was called while the session has nothing relevant left to ask.
    #[error("no relevant action remains; check the session verdict before asking")]
    NoRelevantAction,

    /// A positive step named a question that is not addressable from the
    /// current tree position.
    #[error("question \"{question}\" is not reachable from the current tree position")]
    UnknownQuestion { question: String },

    /// An action referenced a group the question tree does not declare.
    #[error("group \"{group}\" is not declared in the question tree")]
    UnknownGroup { group: String },
}
