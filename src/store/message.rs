//! # Collection Messages
//!
//! Requests sent from a [`CollectionClient`](super::CollectionClient) to its
//! [`CollectionActor`](super::CollectionActor). Each carries a oneshot sender for the reply.

use super::error::StoreError;
use crate::model::Criteria;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the collection actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum CollectionRequest<D> {
    /// Appends a record; replies with the new record count.
    Insert { record: D, respond_to: Response<usize> },
    /// First record (in insertion order) matching the criteria.
    FindOne {
        criteria: Criteria,
        respond_to: Response<Option<D>>,
    },
    Count { respond_to: Response<usize> },
    /// Drops every record; replies with how many were removed.
    Clear { respond_to: Response<usize> },
}
