//! # ActorEntity Trait
//!
//! The contract every document type implements to be stored by a
//! [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the id, the create/update payloads, the custom
//! per-document actions and the error type, so a `Menu` actor can never be handed a
//! `TableCreate` payload.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` type is injected
/// into every hook at `run()` time ("late binding").
///
/// # Atomicity
/// `handle_action` runs inside the actor loop with exclusive access to the
/// document. Everything it does to `self` is observed by other clients as one step.
/// Implementations should validate first and mutate last: a failed action must leave
/// the document as it was.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The document identifier. Generated by the actor's id function on `create`,
    /// chosen by the caller on `set`.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document with a generated id.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific atomic operations (e.g. appending to an embedded list).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per document type, shared by all of its hooks and actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full document from the generated id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
