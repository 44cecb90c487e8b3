//! # Doc Actor
//!
//! An in-process document store built on the **Actor Model**. Each collection
//! (tables, menus, users, ...) is owned by one [`ResourceActor`] task that holds its
//! documents and processes requests one at a time. Clients talk to it through a
//! cheap-to-clone [`ResourceClient`].
//!
//! ## Why a collection per actor?
//!
//! A managed document database gives application code a handful of primitives:
//! read a document, overwrite it, add one with a generated id, delete it, run a
//! filtered query, and keep a live query open. On top of that it offers *atomic
//! per-document mutations* (array union, array remove) that never clobber
//! concurrent writers.
//!
//! An actor gets all of this almost for free:
//!
//! - **Sequential processing**: one message at a time, so every mutation of a
//!   document is atomic with respect to every other mutation. No locks.
//! - **Custom actions**: per-document operations are expressed as an
//!   [`ActorEntity::Action`] enum and executed inside the actor loop.
//! - **Live queries**: the actor knows exactly when a document changes, so it can
//!   push a fresh filtered snapshot to every open [`Subscription`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - your document type and its business rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, storage, fan-out
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Defining a Document
//!
//! ```rust,ignore
//! #[async_trait]
//! impl ActorEntity for Table {
//!     type Id = TableId;
//!     type Create = TableCreate;
//!     type Update = std::convert::Infallible;
//!     type Action = TableAction;
//!     type ActionResult = TableActionResult;
//!     type Context = ();
//!     type Error = TableError;
//!
//!     fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, TableError> { ... }
//!     async fn on_update(&mut self, update: Infallible, _: &()) -> Result<(), TableError> { match update {} }
//!     async fn handle_action(&mut self, action: TableAction, _: &()) -> Result<TableActionResult, TableError> { ... }
//! }
//!
//! let (actor, client) = ResourceActor::<Table>::new(32, next_table_id);
//! // or ResourceActor::<Menu>::keyed(32) when callers choose ids and write with `set`
//! tokio::spawn(actor.run(()));
//!
//! let mut feed = client.subscribe(move |t: &Table| t.restaurant_id == rid).await?;
//! while let Some(tables) = feed.next().await {
//!     // full snapshot of every matching table
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected at **runtime** via [`ResourceActor::run`], not at
//! construction time, so actors can be created first and wired afterwards.
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real [`ResourceClient`] whose requests are
//! answered from queued expectations, which makes store failures trivial to
//! simulate. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
pub use subscription::Subscription;
