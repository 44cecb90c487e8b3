//! # Restaurant Actor
//!
//! Owns the `restaurants` collection: the public details the ordering page shows.
//! Written once at restaurant registration.

pub mod error;

pub use error::*;

use crate::clients::RestaurantClient;
use crate::model::{Restaurant, RestaurantId};
use async_trait::async_trait;
use doc_actor::{ActorEntity, ResourceActor};
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = Infallible;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = RestaurantError;

    fn from_create_params(_id: RestaurantId, params: Infallible) -> Result<Self, RestaurantError> {
        match params {}
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), RestaurantError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), RestaurantError> {
        match action {}
    }
}

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::keyed(buffer_size);
    (actor, RestaurantClient::new(generic_client))
}
