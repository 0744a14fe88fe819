use thiserror::Error;

/// Catalog validation failures, surfaced eagerly at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog contains no hypotheses")]
    Empty,

    #[error("hypothesis name must not be empty")]
    EmptyName,

    #[error("duplicate hypothesis name \"{name}\"")]
    DuplicateName { name: String },

    #[error("hypothesis \"{name}\" declares no positive questions")]
    NoPositiveQuestions { name: String },

    #[error("hypothesis name \"{name}\" is reserved")]
    ReservedName { name: String },
}
