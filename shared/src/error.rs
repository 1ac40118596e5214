//! Store error type

use thiserror::Error;

/// Failure surfaced by a remote document-store operation
///
/// The engine never rolls local state back on these; they are logged and
/// the next mutation's sync attempt is the de facto retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
