//! # Collection Actor
//!
//! The server half of the in-memory collection. It owns the records and the receiving end
//! of the channel, and processes requests one at a time, so the record list needs no lock.

use super::client::CollectionClient;
use super::error::StoreError;
use super::message::CollectionRequest;
use super::Document;
use crate::model::Criteria;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the records of one document type and answers [`CollectionRequest`]s.
///
/// # Usage Pattern
///
/// 1. **Create**: `CollectionActor::new()` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()` on the Tokio runtime.
/// 3. **Use**: clone the client wherever lookups are needed; dropping every clone stops
///    the actor.
///
/// ```rust
/// use params_loader::store::{CollectionActor, Document};
/// use serde::Serialize;
///
/// #[derive(Clone, Debug, Serialize)]
/// struct Book { _id: u32, title: String }
///
/// impl Document for Book {
///     const MODEL_NAME: &'static str = "Book";
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, books) = CollectionActor::<Book>::new(16);
///     tokio::spawn(actor.run());
///
///     books.insert(Book { _id: 1, title: "Dune".into() }).await.unwrap();
///     let found = books.find_by("title", "Dune").await.unwrap();
///     assert_eq!(found.map(|b| b._id), Some(1));
/// }
/// ```
pub struct CollectionActor<D: Document> {
    receiver: mpsc::Receiver<CollectionRequest<D>>,
    records: Vec<D>,
}

impl<D: Document> CollectionActor<D> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the channel capacity; client calls wait while it is full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<D>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: Vec::new(),
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        let model = D::MODEL_NAME;
        info!(model, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Insert { record, respond_to } => {
                    self.records.push(record);
                    debug!(model, size = self.records.len(), "Inserted");
                    let _ = respond_to.send(Ok(self.records.len()));
                }
                CollectionRequest::FindOne {
                    criteria,
                    respond_to,
                } => {
                    let result = self.find_one(&criteria);
                    match &result {
                        Ok(found) => debug!(model, %criteria, found = found.is_some(), "FindOne"),
                        Err(e) => warn!(model, %criteria, error = %e, "FindOne failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.records.len()));
                }
                CollectionRequest::Clear { respond_to } => {
                    let removed = self.records.len();
                    self.records.clear();
                    info!(model, removed, "Cleared");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(model, size = self.records.len(), "Shutdown");
    }

    fn find_one(&self, criteria: &Criteria) -> Result<Option<D>, StoreError> {
        for record in &self.records {
            let value = serde_json::to_value(record)?;
            if criteria.matches(&value) {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }
}
