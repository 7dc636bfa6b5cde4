//! # Loader Options
//!
//! Options are merged from three layers, later layers winning field by field:
//!
//! 1. built-in defaults ([`DEFAULT_FIELD_NAME`], `pass_error_to_next = true`, the 404
//!    error factory, no error message);
//! 2. the base options held by a [`ParamLoaderFactory`](super::ParamLoaderFactory);
//! 3. the options passed when building one handler.
//!
//! An unset field never overrides a set one. An empty `field_name` or `object_name` is
//! kept through the merge but counts as unset when the handler is built, so the default
//! (or derived) value is used.

use crate::error::{BoxError, HttpError};
use std::fmt;
use std::sync::Arc;

/// Field a model is queried by when none is configured.
pub const DEFAULT_FIELD_NAME: &str = "_id";

/// Attachment name for fetch-function sources when none is configured.
pub const DEFAULT_OBJECT_NAME: &str = "object";

/// Builds the error handed to the continuation when nothing was found.
pub type ErrorFactory = Arc<dyn Fn(Option<String>) -> BoxError + Send + Sync>;

/// The built-in factory: an [`HttpError`] with status 404 and the given message.
pub fn default_error_factory() -> ErrorFactory {
    Arc::new(|message: Option<String>| -> BoxError {
        Box::new(HttpError::not_found(message))
    })
}

/// Message given to the error factory: fixed, or computed from the request.
pub enum ErrorMessage<R> {
    Static(Option<String>),
    Dynamic(Arc<dyn Fn(&R) -> Option<String> + Send + Sync>),
}

impl<R> ErrorMessage<R> {
    pub fn fixed(message: impl Into<String>) -> Self {
        Self::Static(Some(message.into()))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Evaluates the message for `req`. Static messages ignore the request.
    pub fn message(&self, req: &R) -> Option<String> {
        match self {
            Self::Static(message) => message.clone(),
            Self::Dynamic(f) => f(req),
        }
    }
}

impl<R> Default for ErrorMessage<R> {
    fn default() -> Self {
        Self::Static(None)
    }
}

impl<R> Clone for ErrorMessage<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(message) => Self::Static(message.clone()),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for ErrorMessage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(message) => f.debug_tuple("Static").field(message).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

/// How a fetch-function source without an explicit object name is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectNamePolicy {
    /// Attach under [`DEFAULT_OBJECT_NAME`].
    #[default]
    Default,
    /// Refuse to build the handler with [`ConfigError::MissingObjectName`](crate::error::ConfigError::MissingObjectName).
    Require,
}

/// Partial loader configuration. Every field is optional so layers can be merged.
pub struct LoaderOptions<R> {
    field_name: Option<String>,
    object_name: Option<String>,
    pass_error_to_next: Option<bool>,
    error_factory: Option<ErrorFactory>,
    error_message: Option<ErrorMessage<R>>,
}

impl<R> Default for LoaderOptions<R> {
    fn default() -> Self {
        Self {
            field_name: None,
            object_name: None,
            pass_error_to_next: None,
            error_factory: None,
            error_message: None,
        }
    }
}

impl<R> Clone for LoaderOptions<R> {
    fn clone(&self) -> Self {
        Self {
            field_name: self.field_name.clone(),
            object_name: self.object_name.clone(),
            pass_error_to_next: self.pass_error_to_next,
            error_factory: self.error_factory.clone(),
            error_message: self.error_message.clone(),
        }
    }
}

impl<R> fmt::Debug for LoaderOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("field_name", &self.field_name)
            .field("object_name", &self.object_name)
            .field("pass_error_to_next", &self.pass_error_to_next)
            .field("error_factory", &self.error_factory.as_ref().map(|_| "<fn>"))
            .field("error_message", &self.error_message)
            .finish()
    }
}

impl<R> LoaderOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model field to match the raw value against. Ignored for fetch functions.
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Name the loaded object is attached under.
    pub fn object_name(mut self, object_name: impl Into<String>) -> Self {
        self.object_name = Some(object_name.into());
        self
    }

    /// When `false`, a missing object is attached as empty and handling continues.
    pub fn pass_error_to_next(mut self, pass: bool) -> Self {
        self.pass_error_to_next = Some(pass);
        self
    }

    pub fn error_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(Option<String>) -> BoxError + Send + Sync + 'static,
    {
        self.error_factory = Some(Arc::new(factory));
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(ErrorMessage::fixed(message));
        self
    }

    pub fn error_message_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> Option<String> + Send + Sync + 'static,
    {
        self.error_message = Some(ErrorMessage::from_fn(f));
        self
    }

    /// Layers `overrides` on top of `self`.
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            field_name: overrides.field_name.or(self.field_name),
            object_name: overrides.object_name.or(self.object_name),
            pass_error_to_next: overrides.pass_error_to_next.or(self.pass_error_to_next),
            error_factory: overrides.error_factory.or(self.error_factory),
            error_message: overrides.error_message.or(self.error_message),
        }
    }

    /// Fills every unset field from the built-in defaults.
    ///
    /// `object_name` stays optional: its default depends on the data source.
    pub(crate) fn resolve(self) -> ResolvedOptions<R> {
        ResolvedOptions {
            field_name: non_empty(self.field_name).unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string()),
            object_name: non_empty(self.object_name),
            pass_error_to_next: self.pass_error_to_next.unwrap_or(true),
            error_factory: self.error_factory.unwrap_or_else(default_error_factory),
            error_message: self.error_message.unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Options after the built-in defaults have been applied.
pub(crate) struct ResolvedOptions<R> {
    pub field_name: String,
    pub object_name: Option<String>,
    pub pass_error_to_next: bool,
    pub error_factory: ErrorFactory,
    pub error_message: ErrorMessage<R>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::status_of;
    use crate::request::Request;

    #[test]
    fn builtin_defaults_fill_unset_fields() {
        let resolved = LoaderOptions::<Request>::new().resolve();
        assert_eq!(resolved.field_name, "_id");
        assert_eq!(resolved.object_name, None);
        assert!(resolved.pass_error_to_next);
        assert_eq!(resolved.error_message.message(&Request::default()), None);

        let err = (resolved.error_factory)(Some("gone".into()));
        assert_eq!(status_of(&err), Some(404));
    }

    #[test]
    fn later_layers_override_field_by_field() {
        let base = LoaderOptions::<Request>::new()
            .object_name("loadedObject")
            .field_name("slug")
            .pass_error_to_next(false);
        let call = LoaderOptions::new().field_name("title");

        let resolved = base.merge(call).resolve();
        assert_eq!(resolved.field_name, "title");
        assert_eq!(resolved.object_name.as_deref(), Some("loadedObject"));
        assert!(!resolved.pass_error_to_next);
    }

    #[test]
    fn empty_names_count_as_unset() {
        let base = LoaderOptions::<Request>::new().object_name("loadedObject");
        let resolved = base
            .merge(LoaderOptions::new().object_name("").field_name(""))
            .resolve();
        assert_eq!(resolved.object_name, None);
        assert_eq!(resolved.field_name, "_id");
    }

    #[test]
    fn dynamic_message_sees_the_request() {
        let message = ErrorMessage::from_fn(|req: &Request| Some(format!("{} not found", req.path)));
        let req = Request::new("GET", "/books/2");
        assert_eq!(message.message(&req).as_deref(), Some("/books/2 not found"));
    }
}
