//! # Data Sources
//!
//! A parameter handler needs *something* that turns a raw parameter value into an object.
//! Two shapes are supported, and the caller picks one explicitly through [`DataSource`]:
//!
//! - **A model** ([`Model`]) that can "find exactly one record whose field equals a value".
//!   The loader builds the `{field: value}` [`Criteria`] itself and derives the attachment
//!   name from [`Model::model_name`].
//! - **A fetch function** ([`Fetch`]) that receives the request and the raw value and does
//!   whatever lookup it likes.
//!
//! Both return `Ok(None)` for "no such object". Any `Err` is an upstream failure and is
//! handed to the continuation exactly as returned.

pub mod criteria;
pub mod fetch;

pub use criteria::*;
pub use fetch::*;

use crate::error::BoxError;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A collection that can look up a single record by field equality.
///
/// This is the seam to the persistence layer. [`crate::store::CollectionClient`] and
/// [`crate::mock::MockModel`] implement it; a database-backed repository would too.
#[async_trait]
pub trait Model: Send + Sync {
    /// The record type this model returns.
    type Record: Send + Sync + 'static;

    /// Declared model name (e.g. `"Book"`), used to derive the default attachment name.
    fn model_name(&self) -> &str;

    /// Returns the first record matching `criteria`, or `None`.
    async fn find_one(&self, criteria: Criteria) -> Result<Option<Self::Record>, BoxError>;
}

/// The lookup a parameter handler performs, selected by the caller.
pub enum DataSource<R, T>
where
    T: Send + Sync + 'static,
{
    Model(Arc<dyn Model<Record = T>>),
    Fetch(Arc<dyn Fetch<R, T>>),
}

impl<R, T> Clone for DataSource<R, T>
where
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        match self {
            Self::Model(model) => Self::Model(Arc::clone(model)),
            Self::Fetch(fetch) => Self::Fetch(Arc::clone(fetch)),
        }
    }
}

impl<R, T> DataSource<R, T>
where
    T: Send + Sync + 'static,
{
    pub fn is_model(&self) -> bool {
        matches!(self, Self::Model(_))
    }
}

impl<R, T> DataSource<R, T>
where
    R: Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    pub fn model<M>(model: M) -> Self
    where
        M: Model<Record = T> + 'static,
    {
        Self::Model(Arc::new(model))
    }

    /// Wraps an async closure `(request, raw_value) -> Result<Option<T>, BoxError>`.
    ///
    /// The closure runs synchronously up to the point it returns its future, so it can
    /// read from the request there; the future itself must not borrow the request.
    pub fn fetch<F, Fut>(f: F) -> Self
    where
        F: Fn(&R, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, BoxError>> + Send + 'static,
    {
        Self::Fetch(Arc::new(FetchFn::new(f)))
    }

    /// Uses a hand-written [`Fetch`] implementation.
    pub fn fetcher<F>(fetch: F) -> Self
    where
        F: Fetch<R, T> + 'static,
    {
        Self::Fetch(Arc::new(fetch))
    }
}
