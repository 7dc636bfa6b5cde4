//! # Loader Errors
//!
//! This module defines the error types shared by the loader, the model seam and the
//! in-memory store. Two families exist:
//!
//! - **Setup errors** ([`ConfigError`]) are returned synchronously when a handler is
//!   built. They are programmer errors and are never recovered.
//! - **Request errors** travel through the continuation as a [`BoxError`]. A missing
//!   object becomes whatever the configured error factory builds ([`HttpError`] by
//!   default); a failing fetch hands over its own error untouched.

/// Type-erased error passed to the continuation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error carrying an HTTP status code, built by the default error factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
pub struct HttpError {
    pub status: u16,
    pub message: Option<String>,
}

impl HttpError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// A `404 Not Found` with an optional message.
    pub fn not_found(message: Option<String>) -> Self {
        Self::new(404, message)
    }
}

/// Returns the status code if `err` is an [`HttpError`].
pub fn status_of(err: &BoxError) -> Option<u16> {
    err.downcast_ref::<HttpError>().map(|e| e.status)
}

/// Errors raised while building a parameter handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Object name for fetch function must be set")]
    MissingObjectName,
    #[error("Object name resolved to an empty string")]
    EmptyObjectName,
    #[error("Invalid loader settings: {0}")]
    InvalidSettings(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_read_back_from_boxed_http_error() {
        let err: BoxError = Box::new(HttpError::not_found(Some("Book not found".into())));
        assert_eq!(status_of(&err), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Book not found");
    }

    #[test]
    fn foreign_errors_have_no_status() {
        let err: BoxError = "connection reset".into();
        assert_eq!(status_of(&err), None);
    }
}
