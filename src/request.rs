//! # Request Context
//!
//! The handler never owns the request. It adds exactly one named attachment to it, which
//! is what [`ParamRequest`] captures. Any framework request type can implement the trait;
//! [`Request`] is a ready-made context used by the demo and the tests.

use std::any::Any;
use std::collections::HashMap;

/// What a parameter handler needs from the framework's request type.
pub trait ParamRequest: Send + Sync {
    /// Attaches `object` under `name`, replacing any earlier value.
    ///
    /// `None` is still an attachment: it records that the lookup ran and found nothing.
    fn attach<T: Send + Sync + 'static>(&mut self, name: &str, object: Option<T>);
}

/// A plain request context with captured route parameters and named attachments.
#[derive(Debug, Default)]
pub struct Request {
    pub method: String,
    pub path: String,
    params: HashMap<String, String>,
    attachments: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to record a captured parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// The raw value captured for the route parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the attached object, or `None` if nothing (or an empty result) was attached
    /// under `name`, or it has a different type.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.attachments
            .get(name)
            .and_then(|slot| slot.downcast_ref::<Option<T>>())
            .and_then(Option::as_ref)
    }

    /// Whether a handler wrote to `name`, even if it wrote an empty result.
    pub fn is_attached(&self, name: &str) -> bool {
        self.attachments.contains_key(name)
    }

    /// Removes and returns the attachment under `name`.
    pub fn take<T: 'static>(&mut self, name: &str) -> Option<T> {
        let slot = self.attachments.remove(name)?;
        match slot.downcast::<Option<T>>() {
            Ok(object) => *object,
            Err(slot) => {
                self.attachments.insert(name.to_string(), slot);
                None
            }
        }
    }
}

impl ParamRequest for Request {
    fn attach<T: Send + Sync + 'static>(&mut self, name: &str, object: Option<T>) {
        self.attachments.insert(name.to_string(), Box::new(object));
    }
}
