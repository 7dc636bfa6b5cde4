//! # Collection Client
//!
//! The cloneable handle used to talk to a [`CollectionActor`](super::CollectionActor).
//! It is also a [`Model`], so it can be handed straight to a parameter loader.

use super::error::StoreError;
use super::message::CollectionRequest;
use super::Document;
use crate::error::BoxError;
use crate::model::{Criteria, Model};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `CollectionActor<D>`. Holds only a sender, so cloning is cheap.
pub struct CollectionClient<D: Document> {
    sender: mpsc::Sender<CollectionRequest<D>>,
}

impl<D: Document> Clone for CollectionClient<D> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<D: Document> CollectionClient<D> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<D>>) -> Self {
        Self { sender }
    }

    /// Stores `record` and returns the collection size.
    pub async fn insert(&self, record: D) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Insert { record, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn find(&self, criteria: Criteria) -> Result<Option<D>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::FindOne {
                criteria,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Shorthand for a single-field [`find`](Self::find).
    pub async fn find_by(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<D>, StoreError> {
        self.find(Criteria::by(field, value)).await
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Count { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Removes every record and returns how many there were.
    pub async fn clear(&self) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Clear { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl<D: Document> Model for CollectionClient<D> {
    type Record = D;

    fn model_name(&self) -> &str {
        D::MODEL_NAME
    }

    async fn find_one(&self, criteria: Criteria) -> Result<Option<D>, BoxError> {
        Ok(self.find(criteria).await?)
    }
}
