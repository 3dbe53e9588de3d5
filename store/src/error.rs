use thiserror::Error;

/// Failures of a state store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("storage backend: {0}")]
    Backend(String),

    /// A stored value could not be encoded or decoded.
    #[error("cannot encode or decode stored value: {0}")]
    Serialization(String),

    /// Stored data breaks a schema invariant.
    #[error("store is corrupted: {0}")]
    Corruption(String),

    /// A write set was refused before any part of it was applied.
    #[error("commit rejected: {0}")]
    CommitRejected(String),
}
