//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Handler construction**: resolved object name, field name and error policy (`debug`)
//! - **Lookups**: every `find_one` criteria or fetch call (`debug`), wrapped in a
//!   `load_param` span carrying `param` and `object_name`
//! - **Outcomes**: loaded objects and empty attachments (`debug`), not-found errors and
//!   upstream failures (`warn`)
//! - **Collections**: start, clear and shutdown (`info`), inserts and queries (`debug`)
//!
//! ```bash
//! # Outcomes only
//! RUST_LOG=warn cargo run
//!
//! # Every lookup
//! RUST_LOG=params_loader=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a missing book reads:
//!
//! ```text
//! DEBUG load_param: Finding one criteria={_id: "2"} model="Book" param="id" object_name=book
//! DEBUG load_param: FindOne model="Book" criteria={_id: "2"} found=false param="id" object_name=book
//!  WARN load_param: Not found object_name="book" value="2" param="id" object_name=book
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
