//! # Mock Models & Testing Guide
//!
//! [`MockModel<T>`] implements [`Model`] entirely in memory with queued expectations. Use
//! it to test parameter handlers without starting a collection actor, and to inject
//! failures that a real store cannot produce on demand.
//!
//! | Feature | MockModel | CollectionActor |
//! |---------|-----------|-----------------|
//! | **Speed** | Instant | Fast (spawns a task) |
//! | **State** | Expectations only | Real records |
//! | **Checks the query** | Yes (`expect_find_one(criteria)`) | No |
//! | **Error injection** | `return_err` | Not possible |
//!
//! ```rust
//! use params_loader::loader::{load_model, LoaderOptions};
//! use params_loader::mock::MockModel;
//! use params_loader::model::Criteria;
//! use params_loader::request::Request;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut books = MockModel::<String>::new("Book");
//!     books
//!         .expect_find_one(Criteria::by("title", "Dune"))
//!         .return_ok(Some("Dune".to_string()));
//!
//!     let handler = load_model(books.clone(), LoaderOptions::<Request>::new().field_name("title")).unwrap();
//!     let mut req = Request::new("GET", "/books/by-title/Dune");
//!     handler.resolve(&mut req, "Dune").await.unwrap();
//!
//!     assert_eq!(req.get::<String>("book").map(String::as_str), Some("Dune"));
//!     books.verify();
//! }
//! ```

use crate::error::BoxError;
use crate::model::{Criteria, Model};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A queued `find_one` answer. `criteria: None` accepts any query.
struct Expectation<T> {
    criteria: Option<Criteria>,
    response: Result<Option<T>, BoxError>,
}

/// A [`Model`] that answers `find_one` from queued expectations, in order.
///
/// Clones share the same queue, so a clone can be handed to a loader while the original
/// is kept for [`verify`](Self::verify).
pub struct MockModel<T> {
    model_name: String,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<Mutex<Vec<Criteria>>>,
}

impl<T> Clone for MockModel<T> {
    fn clone(&self) -> Self {
        Self {
            model_name: self.model_name.clone(),
            expectations: Arc::clone(&self.expectations),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<T: Send + Sync + 'static> MockModel<T> {
    /// Creates a mock with no expectations.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Expects a `find_one` with exactly `criteria`.
    pub fn expect_find_one(&mut self, criteria: Criteria) -> FindOneExpectationBuilder<T> {
        FindOneExpectationBuilder {
            criteria: Some(criteria),
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `find_one` with any criteria.
    pub fn expect_any_find_one(&mut self) -> FindOneExpectationBuilder<T> {
        FindOneExpectationBuilder {
            criteria: None,
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Every criteria received so far, in call order.
    pub fn calls(&self) -> Vec<Criteria> {
        self.calls.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `find_one` expectations.
pub struct FindOneExpectationBuilder<T> {
    criteria: Option<Criteria>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T> FindOneExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    /// Sets the expectation to fail with `error`.
    pub fn return_err(self, error: impl Into<BoxError>) {
        self.push(Err(error.into()));
    }

    fn push(self, response: Result<Option<T>, BoxError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            criteria: self.criteria,
            response,
        });
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> Model for MockModel<T> {
    type Record = T;

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn find_one(&self, criteria: Criteria) -> Result<Option<T>, BoxError> {
        self.calls.lock().unwrap().push(criteria.clone());
        let next = self.expectations.lock().unwrap().pop_front();

        match next {
            Some(Expectation {
                criteria: expected,
                response,
            }) => {
                if let Some(expected) = expected {
                    assert_eq!(expected, criteria, "find_one called with unexpected criteria");
                }
                response
            }
            None => panic!("Unexpected find_one({criteria}): no expectation left"),
        }
    }
}
