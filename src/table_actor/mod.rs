//! # Table Actor
//!
//! Owns the `tables` collection. Each table document embeds its own order queue,
//! so every order mutation is an action on one table document.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](doc_actor::ActorEntity) implementation for [`Table`]
//! - [`error`] - [`TableError`]
//! - [`actions`] - [`TableAction`] and [`TableActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TableClient;
use crate::model::{Table, TableId};
use doc_actor::ResourceActor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Creates a new Table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Table>, TableClient) {
    let table_id_counter = Arc::new(AtomicU32::new(1));
    let next_table_id = move || TableId(table_id_counter.fetch_add(1, Ordering::SeqCst));

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_table_id);
    let client = TableClient::new(generic_client);

    (actor, client)
}
