//! # In-Memory Collections
//!
//! A small actor-backed document collection that implements [`Model`](crate::model::Model).
//! It stands in for a database in the demo and the tests: records are kept in insertion
//! order and `find_one` compares the serialized record against the criteria.
//!
//! - [`CollectionActor`] owns the records and processes requests sequentially.
//! - [`CollectionClient`] is the cloneable handle; dropping every clone stops the actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use error::StoreError;
pub use message::{CollectionRequest, Response};

use serde::Serialize;

/// A record type that can live in a collection.
pub trait Document: Serialize + Clone + Send + Sync + 'static {
    /// Declared model name, e.g. `"Book"`.
    const MODEL_NAME: &'static str;
}
