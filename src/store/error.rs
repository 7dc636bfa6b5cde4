//! # Store Errors

/// Errors raised by the in-memory collection actor or its client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Record could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
