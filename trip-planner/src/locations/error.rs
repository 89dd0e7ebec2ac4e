//! Location store error types.

use uuid::Uuid;

/// Errors from a `LocationStore`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file is not valid JSON for a location book
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No stored location has this id
    #[error("location {0} not found")]
    NotFound(Uuid),
}
