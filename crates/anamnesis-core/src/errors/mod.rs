//! Error types for the anamnesis workspace.
//!
//! One enum per failure domain, aggregated into [`AnamnesisError`] so that
//! pipeline code can return a single result type.

mod catalog_error;
mod contradiction;
mod interview_error;
mod store_error;
mod tree_error;

pub use catalog_error::CatalogError;
pub use contradiction::ContradictionError;
pub use interview_error::InterviewError;
pub use store_error::StoreError;
pub use tree_error::TreeError;

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum AnamnesisError {
    #[error(transparent)]
    Contradiction(#[from] ContradictionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Interview(#[from] InterviewError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias used across the workspace.
pub type AnamnesisResult<T> = Result<T, AnamnesisError>;
