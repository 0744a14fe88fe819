use thiserror::Error;

/// Failures loading or saving the JSON artifacts: catalogs, rule sets,
/// tree layouts, and value tables.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed value-table key \"{key}\"")]
    InvalidKey { key: String },
}
