//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter for the whole
//! process. Every collection actor logs with an `entity_type` field, so module
//! paths are hidden (`with_target(false)`) to keep lines short.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started`, `Shutdown` with the final document count
//! - **Document Operations**: Create, Get, Set, Update, Delete, Action, Query
//! - **Live Queries**: `Subscribed` with the number of open watchers
//! - **Errors**: hook and action failures with the document id
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run      # full payloads (create params, actions)
//! RUST_LOG=doc_actor=debug,tableside=info cargo run
//! ```
//!
//! With `RUST_LOG=info` an order moving through the system looks like:
//!
//! ```text
//! INFO Actor started entity_type="Table"
//! INFO Created entity_type="Table" id=table_1 size=1
//! INFO submit: Order submitted order_id=5b0c… table_id=table_1 total=10.00
//! INFO Action ok entity_type="Table" id=table_1
//! INFO New pending orders count=1
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"`) is used.
/// Call once per process.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact()
        .init();
}
