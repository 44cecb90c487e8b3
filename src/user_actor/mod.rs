//! # User Actor
//!
//! Owns the `users` collection of [`Identity`] documents, keyed by the account id
//! the auth provider issued.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::Identity;
use doc_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Identity>, UserClient) {
    let (actor, generic_client) = ResourceActor::keyed(buffer_size);
    (actor, UserClient::new(generic_client))
}
