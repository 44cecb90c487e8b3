//! # Menu Actor
//!
//! Owns the `menus` collection: one [`Menu`] document per restaurant, replaced
//! whole on every save.

pub mod entity;
pub mod error;

pub use entity::validate_items;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::Menu;
use doc_actor::ResourceActor;

/// Creates a new Menu actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Menu>, MenuClient) {
    let (actor, generic_client) = ResourceActor::keyed(buffer_size);
    (actor, MenuClient::new(generic_client))
}
