//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// Snapshot record could not be encoded or decoded.
    #[error("snapshot codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type StateResult<T> = core::result::Result<T, StateError>;
