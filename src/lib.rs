//! # Params Loader
//!
//! > **Resolve route parameters into domain objects before your handler runs.**
//!
//! Routes like `/books/:id` almost always start by looking the `id` up. This crate builds
//! that step once: a [`ParamHandler`](loader::ParamHandler) receives the raw parameter
//! value, fetches the matching object, attaches it to the request under a name, and
//! continues, or hands a "not found" error to the router instead.
//!
//! ## 🏗️ Design
//!
//! ### Two explicit data sources
//! The caller chooses the lookup through [`DataSource`](model::DataSource):
//! - a [`Model`](model::Model), queried with `{field_name: raw_value}`;
//! - a fetch function `(request, raw_value) -> Option<T>`.
//!
//! ### Layered options, no global state
//! Options merge built-in defaults, the base options of a
//! [`ParamLoaderFactory`](loader::ParamLoaderFactory) and per-route options. The factory is
//! built at startup and passed around; there is no process-wide mutable default.
//!
//! ### Errors
//! Setup problems are [`ConfigError`](error::ConfigError)s returned when the handler is
//! built. At request time a missing object becomes a 404 [`HttpError`](error::HttpError)
//! (or whatever the configured factory builds), and a failing lookup passes its own error
//! through unchanged.
//!
//! ## 🗺️ Module Tour
//!
//! - [`loader`]: the factory, the handler and their options.
//! - [`model`]: the `Model` and `Fetch` seams and the `Criteria` query object.
//! - [`request`]: what a handler needs from a request, plus a ready-made [`Request`](request::Request).
//! - [`store`]: an actor-backed in-memory collection implementing `Model`.
//! - [`mock`]: an expectation-based `Model` for tests.
//! - [`config`]: base options from a TOML settings file.
//! - [`runtime`]: tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod mock;
pub mod model;
pub mod request;
pub mod runtime;
pub mod store;

pub use error::{BoxError, ConfigError, HttpError};
pub use loader::{load_model, load_with, LoaderOptions, ParamHandler, ParamLoaderFactory};
pub use model::{Criteria, DataSource, Model};
pub use request::{ParamRequest, Request};
