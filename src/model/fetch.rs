//! Arbitrary fetch operations `(request, raw_value) -> Option<T>`.

use crate::error::BoxError;
use async_trait::async_trait;
use std::future::Future;

/// A caller-supplied lookup that receives the request and the raw parameter value.
#[async_trait]
pub trait Fetch<R, T>: Send + Sync {
    async fn fetch(&self, req: &R, value: &str) -> Result<Option<T>, BoxError>;
}

/// Adapter that turns an async closure into a [`Fetch`].
pub struct FetchFn<F> {
    f: F,
}

impl<F> FetchFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<R, T, F, Fut> Fetch<R, T> for FetchFn<F>
where
    R: Send + Sync + 'static,
    T: Send + 'static,
    F: Fn(&R, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<T>, BoxError>> + Send + 'static,
{
    async fn fetch(&self, req: &R, value: &str) -> Result<Option<T>, BoxError> {
        (self.f)(req, value.to_string()).await
    }
}
