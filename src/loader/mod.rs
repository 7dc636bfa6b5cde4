//! # Parameter Loaders
//!
//! A [`ParamLoaderFactory`] turns a [`DataSource`] plus [`LoaderOptions`] into a
//! [`ParamHandler`]: the callback a router runs for every occurrence of a route parameter.
//!
//! ## Building (once, at route registration)
//!
//! 1. Merge built-in defaults, the factory's base options and the per-call options.
//! 2. Resolve the error message (fixed or computed from the request) and the error factory.
//! 3. Pick the lookup from the data source:
//!    - a [`Model`](crate::model::Model) is queried with `{field_name: raw_value}` and the
//!      object is attached under the model name with its first character lowercased
//!      unless configured;
//!    - a fetch function is called with `(request, raw_value)` and the object is attached
//!      under `"object"` unless configured.
//!
//! ## Running (once per parameter occurrence)
//!
//! | Lookup result | `pass_error_to_next` | Attachment | Continuation |
//! |---|---|---|---|
//! | `Ok(Some(obj))` | any | `Some(obj)` | `None` |
//! | `Ok(None)` | `true` | untouched | `Some(error_factory(message))` |
//! | `Ok(None)` | `false` | `None` | `None` |
//! | `Err(e)` | any | untouched | `Some(e)`, unchanged |
//!
//! There is one suspension point (the lookup). Nothing is cached between invocations.
//!
//! ```rust
//! use params_loader::error::BoxError;
//! use params_loader::loader::{load_with, LoaderOptions};
//! use params_loader::request::Request;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Book { id: u32 }
//!
//! #[tokio::main]
//! async fn main() {
//!     let handler = load_with(
//!         |_req: &Request, id: String| async move {
//!             Ok(id.parse::<u32>().ok().map(|id| Book { id }))
//!         },
//!         LoaderOptions::new().object_name("book"),
//!     )
//!     .unwrap();
//!
//!     let mut req = Request::new("GET", "/books/7").with_param("id", "7");
//!     let mut outcome = None;
//!     handler
//!         .handle(&mut req, |err: Option<BoxError>| outcome = Some(err), "7", "id")
//!         .await;
//!
//!     assert!(matches!(outcome, Some(None)));
//!     assert_eq!(req.get::<Book>("book"), Some(&Book { id: 7 }));
//! }
//! ```

pub mod naming;
pub mod options;

pub use naming::lower_camel_case;
pub use options::*;

use crate::error::{BoxError, ConfigError};
use crate::model::{Criteria, DataSource, Model};
use crate::request::ParamRequest;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// The continuation a handler calls exactly once: `None` to continue, `Some(err)` to fail.
pub trait Next: Send {
    fn call(self, err: Option<BoxError>);
}

impl<F> Next for F
where
    F: FnOnce(Option<BoxError>) + Send,
{
    fn call(self, err: Option<BoxError>) {
        self(err)
    }
}

/// Object-safe view of a handler, so a router can keep loaders for different object
/// types side by side.
#[async_trait]
pub trait ParamMiddleware<R>: Send + Sync {
    async fn run(&self, req: &mut R, raw_value: &str, param_name: &str) -> Result<(), BoxError>;
}

/// Builds [`ParamHandler`]s from base options supplied by the caller.
///
/// The base options are owned by the factory, not shared globally: build one factory at
/// startup and pass it to wherever routes are registered.
pub struct ParamLoaderFactory<R> {
    defaults: LoaderOptions<R>,
    policy: ObjectNamePolicy,
}

impl<R> Default for ParamLoaderFactory<R> {
    fn default() -> Self {
        Self {
            defaults: LoaderOptions::default(),
            policy: ObjectNamePolicy::default(),
        }
    }
}

impl<R> Clone for ParamLoaderFactory<R> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
            policy: self.policy,
        }
    }
}

impl<R> fmt::Debug for ParamLoaderFactory<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamLoaderFactory")
            .field("defaults", &self.defaults)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<R> ParamLoaderFactory<R>
where
    R: ParamRequest + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose handlers start from `defaults` instead of the built-in values.
    pub fn with_defaults(defaults: LoaderOptions<R>) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Sets how fetch-function sources without an object name are handled.
    pub fn object_name_policy(mut self, policy: ObjectNamePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn defaults(&self) -> &LoaderOptions<R> {
        &self.defaults
    }

    /// Replaces the base options. Handlers built earlier keep what they were built with.
    pub fn set_defaults(&mut self, defaults: LoaderOptions<R>) {
        self.defaults = defaults;
    }

    pub fn clear_defaults(&mut self) {
        self.defaults = LoaderOptions::default();
    }

    /// Builds a handler for `source` with per-call `options` layered over the base options.
    pub fn load<T>(
        &self,
        source: DataSource<R, T>,
        options: LoaderOptions<R>,
    ) -> Result<ParamHandler<R, T>, ConfigError>
    where
        T: Send + Sync + 'static,
    {
        let resolved = self.defaults.clone().merge(options).resolve();

        let (field_name, object_name) = match &source {
            DataSource::Model(model) => {
                let object_name = resolved
                    .object_name
                    .unwrap_or_else(|| lower_camel_case(model.model_name()));
                (Some(resolved.field_name), object_name)
            }
            DataSource::Fetch(_) => {
                let object_name = match (resolved.object_name, self.policy) {
                    (Some(name), _) => name,
                    (None, ObjectNamePolicy::Default) => DEFAULT_OBJECT_NAME.to_string(),
                    (None, ObjectNamePolicy::Require) => {
                        return Err(ConfigError::MissingObjectName)
                    }
                };
                (None, object_name)
            }
        };

        if object_name.is_empty() {
            return Err(ConfigError::EmptyObjectName);
        }

        debug!(
            %object_name,
            field_name = field_name.as_deref().unwrap_or("-"),
            pass_error_to_next = resolved.pass_error_to_next,
            "Param loader built"
        );

        Ok(ParamHandler {
            inner: Arc::new(HandlerInner {
                source,
                field_name,
                object_name,
                pass_error_to_next: resolved.pass_error_to_next,
                error_factory: resolved.error_factory,
                error_message: resolved.error_message,
            }),
        })
    }

    pub fn load_model<M>(
        &self,
        model: M,
        options: LoaderOptions<R>,
    ) -> Result<ParamHandler<R, M::Record>, ConfigError>
    where
        M: Model + 'static,
    {
        self.load(DataSource::model(model), options)
    }

    pub fn load_with<T, F, Fut>(
        &self,
        fetch: F,
        options: LoaderOptions<R>,
    ) -> Result<ParamHandler<R, T>, ConfigError>
    where
        T: Send + Sync + 'static,
        F: Fn(&R, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<T>, BoxError>> + Send + 'static,
    {
        self.load(DataSource::fetch(fetch), options)
    }
}

/// Builds a model-backed handler with no base options.
pub fn load_model<R, M>(
    model: M,
    options: LoaderOptions<R>,
) -> Result<ParamHandler<R, M::Record>, ConfigError>
where
    R: ParamRequest + 'static,
    M: Model + 'static,
{
    ParamLoaderFactory::new().load_model(model, options)
}

/// Builds a fetch-function handler with no base options.
pub fn load_with<R, T, F, Fut>(
    fetch: F,
    options: LoaderOptions<R>,
) -> Result<ParamHandler<R, T>, ConfigError>
where
    R: ParamRequest + 'static,
    T: Send + Sync + 'static,
    F: Fn(&R, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<T>, BoxError>> + Send + 'static,
{
    ParamLoaderFactory::new().load_with(fetch, options)
}

struct HandlerInner<R, T>
where
    T: Send + Sync + 'static,
{
    source: DataSource<R, T>,
    field_name: Option<String>,
    object_name: String,
    pass_error_to_next: bool,
    error_factory: ErrorFactory,
    error_message: ErrorMessage<R>,
}

/// A built route-parameter handler. Cheap to clone.
pub struct ParamHandler<R, T>
where
    T: Send + Sync + 'static,
{
    inner: Arc<HandlerInner<R, T>>,
}

impl<R, T> Clone for ParamHandler<R, T>
where
    T: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, T> fmt::Debug for ParamHandler<R, T>
where
    T: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamHandler")
            .field("source", &if self.inner.source.is_model() { "model" } else { "fetch" })
            .field("field_name", &self.inner.field_name)
            .field("object_name", &self.inner.object_name)
            .field("pass_error_to_next", &self.inner.pass_error_to_next)
            .field("error_message", &self.inner.error_message)
            .finish()
    }
}

impl<R, T> ParamHandler<R, T>
where
    R: ParamRequest + 'static,
    T: Send + Sync + 'static,
{
    /// Name the object is attached under.
    pub fn object_name(&self) -> &str {
        &self.inner.object_name
    }

    /// Model field queried; `None` for fetch-function sources.
    pub fn field_name(&self) -> Option<&str> {
        self.inner.field_name.as_deref()
    }

    pub fn passes_error_to_next(&self) -> bool {
        self.inner.pass_error_to_next
    }

    /// Router entry point: loads the object for `raw_value` and calls `next` once.
    #[tracing::instrument(
        name = "load_param",
        skip_all,
        fields(param = param_name, object_name = %self.inner.object_name)
    )]
    pub async fn handle<N>(&self, req: &mut R, next: N, raw_value: &str, param_name: &str)
    where
        N: Next,
    {
        let result = self.resolve(req, raw_value).await;
        next.call(result.err());
    }

    /// Loads the object for `raw_value` and attaches it to `req`.
    ///
    /// `Err` is what the continuation would receive.
    pub async fn resolve(&self, req: &mut R, raw_value: &str) -> Result<(), BoxError> {
        let inner = &*self.inner;
        let object_name = inner.object_name.as_str();

        let fetched = match &inner.source {
            DataSource::Model(model) => {
                let field = inner.field_name.as_deref().unwrap_or(DEFAULT_FIELD_NAME);
                let criteria = Criteria::by(field, raw_value);
                debug!(%criteria, model = model.model_name(), "Finding one");
                model.find_one(criteria).await
            }
            DataSource::Fetch(fetch) => {
                debug!(value = raw_value, "Fetching");
                fetch.fetch(&*req, raw_value).await
            }
        };

        match fetched {
            Ok(Some(object)) => {
                debug!(object_name, value = raw_value, "Loaded");
                req.attach(object_name, Some(object));
                Ok(())
            }
            Ok(None) if inner.pass_error_to_next => {
                let message = inner.error_message.message(req);
                warn!(object_name, value = raw_value, "Not found");
                Err((inner.error_factory)(message))
            }
            Ok(None) => {
                debug!(object_name, value = raw_value, "Not found, attaching empty");
                req.attach::<T>(object_name, None);
                Ok(())
            }
            Err(e) => {
                warn!(object_name, value = raw_value, error = %e, "Lookup failed");
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<R, T> ParamMiddleware<R> for ParamHandler<R, T>
where
    R: ParamRequest + 'static,
    T: Send + Sync + 'static,
{
    async fn run(&self, req: &mut R, raw_value: &str, _param_name: &str) -> Result<(), BoxError> {
        self.resolve(req, raw_value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{status_of, HttpError};
    use crate::mock::MockModel;
    use crate::request::Request;

    #[derive(Clone, Debug, PartialEq)]
    struct Book {
        id: u32,
        title: String,
    }

    fn hobbit() -> Book {
        Book {
            id: 1,
            title: "The Hobbit".into(),
        }
    }

    async fn run<T: Send + Sync + 'static>(
        handler: &ParamHandler<Request, T>,
        req: &mut Request,
        value: &str,
    ) -> Option<BoxError> {
        let mut outcome = None;
        handler
            .handle(req, |err: Option<BoxError>| outcome = Some(err), value, "id")
            .await;
        outcome.expect("continuation was not called")
    }

    #[tokio::test]
    async fn model_defaults_to_id_field_and_lowercased_name() {
        let mut mock = MockModel::<Book>::new("BookReview");
        mock.expect_find_one(Criteria::by("_id", "1"))
            .return_ok(Some(hobbit()));

        let handler = load_model(mock.clone(), LoaderOptions::new()).unwrap();
        assert_eq!(handler.object_name(), "bookReview");
        assert_eq!(handler.field_name(), Some("_id"));

        let mut req = Request::new("GET", "/reviews/1");
        assert!(run(&handler, &mut req, "1").await.is_none());
        assert_eq!(req.get::<Book>("bookReview"), Some(&hobbit()));
        mock.verify();
    }

    #[tokio::test]
    async fn fetch_function_attaches_under_object() {
        let handler = load_with(
            |_req: &Request, _id: String| async move { Ok(Some(hobbit())) },
            LoaderOptions::new(),
        )
        .unwrap();

        let mut req = Request::new("GET", "/books/1");
        assert!(run(&handler, &mut req, "1").await.is_none());
        assert_eq!(handler.object_name(), "object");
        assert_eq!(handler.field_name(), None);
        assert_eq!(req.get::<Book>("object"), Some(&hobbit()));
    }

    #[tokio::test]
    async fn missing_object_becomes_404_by_default() {
        let handler = load_with(
            |_req: &Request, _id: String| async move { Ok(None::<Book>) },
            LoaderOptions::new().object_name("book"),
        )
        .unwrap();

        let mut req = Request::new("GET", "/books/2");
        let err = run(&handler, &mut req, "2").await.expect("expected an error");
        assert_eq!(status_of(&err), Some(404));
        assert!(!req.is_attached("book"));
    }

    #[tokio::test]
    async fn missing_object_is_attached_empty_when_not_passing_errors() {
        let handler = load_with(
            |_req: &Request, _id: String| async move { Ok(None::<Book>) },
            LoaderOptions::new()
                .object_name("bestseller")
                .pass_error_to_next(false),
        )
        .unwrap();

        let mut req = Request::new("GET", "/books/bestsellers/2");
        assert!(run(&handler, &mut req, "2").await.is_none());
        assert!(req.is_attached("bestseller"));
        assert!(req.get::<Book>("bestseller").is_none());
    }

    #[tokio::test]
    async fn error_message_and_factory_are_pluggable() {
        let handler = load_with(
            |_req: &Request, _id: String| async move { Ok(None::<Book>) },
            LoaderOptions::new()
                .error_message_fn(|req: &Request| Some(format!("nothing at {}", req.path)))
                .error_factory(|message| Box::new(HttpError::new(410, message))),
        )
        .unwrap();

        let mut req = Request::new("GET", "/books/9");
        let err = run(&handler, &mut req, "9").await.unwrap();
        let http = err.downcast_ref::<HttpError>().unwrap();
        assert_eq!(http.status, 410);
        assert_eq!(http.message.as_deref(), Some("nothing at /books/9"));
    }

    #[tokio::test]
    async fn strict_policy_requires_object_name_for_fetch_functions() {
        let factory = ParamLoaderFactory::<Request>::new().object_name_policy(ObjectNamePolicy::Require);
        let err = factory
            .load_with(
                |_req: &Request, _id: String| async move { Ok(Some(hobbit())) },
                LoaderOptions::new(),
            )
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingObjectName);

        let ok = factory.load_with(
            |_req: &Request, _id: String| async move { Ok(Some(hobbit())) },
            LoaderOptions::new().object_name("book"),
        );
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn empty_model_name_is_rejected() {
        let mock = MockModel::<Book>::new("");
        let err = load_model::<Request, _>(mock, LoaderOptions::new()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyObjectName);
    }

    #[tokio::test]
    async fn derived_names_keep_everything_after_the_first_character() {
        for (model_name, object_name) in [
            ("order_line", "order_line"),
            ("Best Seller", "best Seller"),
            ("Gift-card", "gift-card"),
            ("_Internal", "_Internal"),
            ("_", "_"),
        ] {
            let handler =
                load_model::<Request, _>(MockModel::<Book>::new(model_name), LoaderOptions::new())
                    .unwrap();
            assert_eq!(handler.object_name(), object_name);
        }
    }

    #[test]
    fn debug_output_names_the_source_kind() {
        let model = load_model::<Request, _>(MockModel::<Book>::new("Book"), LoaderOptions::new())
            .unwrap();
        let rendered = format!("{model:?}");
        assert!(rendered.contains("\"model\""));
        assert!(rendered.contains("\"book\""));

        let fetch = load_with(
            |_req: &Request, _id: String| async move { Ok(Some(hobbit())) },
            LoaderOptions::new(),
        )
        .unwrap();
        assert!(format!("{fetch:?}").contains("\"fetch\""));
    }

    struct Shelf(Vec<Book>);

    #[async_trait]
    impl crate::model::Fetch<Request, Book> for Shelf {
        async fn fetch(&self, req: &Request, value: &str) -> Result<Option<Book>, BoxError> {
            let field = req.param("field").unwrap_or("id");
            Ok(self
                .0
                .iter()
                .find(|book| match field {
                    "title" => book.title == value,
                    _ => book.id.to_string() == value,
                })
                .cloned())
        }
    }

    #[tokio::test]
    async fn hand_written_fetch_implementation() {
        let handler = ParamLoaderFactory::<Request>::new()
            .load(
                DataSource::<Request, Book>::fetcher(Shelf(vec![hobbit()])),
                LoaderOptions::new().object_name("book"),
            )
            .unwrap();

        let mut req = Request::new("GET", "/books/1");
        assert!(run(&handler, &mut req, "1").await.is_none());
        assert_eq!(req.get::<Book>("book"), Some(&hobbit()));

        let mut req = Request::new("GET", "/books/by-title").with_param("field", "title");
        assert!(run(&handler, &mut req, "The Hobbit").await.is_none());
        assert_eq!(req.get::<Book>("book"), Some(&hobbit()));

        let mut req = Request::new("GET", "/books/2");
        let err = run(&handler, &mut req, "2").await.expect("expected a 404");
        assert_eq!(status_of(&err), Some(404));
    }

    #[tokio::test]
    async fn middleware_view_matches_handle() {
        let handler = load_with(
            |_req: &Request, id: String| async move {
                id.parse::<u32>()
                    .map(|id| {
                        Some(Book {
                            id,
                            title: "Dune".into(),
                        })
                    })
                    .map_err(BoxError::from)
            },
            LoaderOptions::new().object_name("book"),
        )
        .unwrap();
        let middleware: Arc<dyn ParamMiddleware<Request>> = Arc::new(handler);

        let mut req = Request::new("GET", "/books/3");
        middleware.run(&mut req, "3", "id").await.unwrap();
        assert_eq!(req.get::<Book>("book").map(|b| b.id), Some(3));

        let err = middleware.run(&mut req, "three", "id").await.unwrap_err();
        assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    }
}
