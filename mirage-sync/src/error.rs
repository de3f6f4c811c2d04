//! Error types for the sync layer.

use crate::transport::TransportError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport failure, propagated opaque from the collaborator.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response payload did not have the expected shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Page navigation attempted without a stored cursor.
    #[error("no {0} page link recorded")]
    MissingPageLink(&'static str),
}
