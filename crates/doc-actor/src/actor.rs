//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one collection
//! of documents. It processes messages sequentially, so it needs no locks, and it
//! fans out fresh snapshots to live subscribers after every successful mutation.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use crate::subscription::Subscription;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// An open live query held by the actor.
struct Watcher<T> {
    filter: Filter<T>,
    sender: watch::Sender<Vec<T>>,
}

/// The generic actor that manages a collection of documents.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the documents (`store`),
/// the open live queries (`watchers`) and the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its messages *sequentially*. Two clients racing to
/// append to the same document are serialized here, so neither write can clobber
/// the other. That is the whole concurrency story; there is no `Mutex` anywhere.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(buffer, next_id)` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// # Operations
///
/// * **Create**: generate an id, build the document, run `on_create`, store it.
/// * **Get**: clone of the document, or `None`.
/// * **Set**: insert or overwrite under the given id. No hooks run.
/// * **Update**: run `on_update` against the stored document, return the new state.
/// * **Delete**: run `on_delete`, remove.
/// * **Action**: run `handle_action` against the stored document.
/// * **Query**: clone every document matching the filter.
/// * **Subscribe**: register a watcher and push the first snapshot immediately.
///
/// Every successful Create/Set/Update/Delete/Action notifies the watchers whose
/// filter matched the document before or after the change.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    watchers: Vec<Watcher<T>>,
    next_id_fn: Option<Box<dyn Fn() -> T::Id + Send + Sync>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full, client
    ///   calls wait until there is space.
    /// * `next_id_fn` - Generates ids for documents added through `create`.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id_fn)))
    }

    /// Creates an actor for a collection keyed by the caller (e.g. one document
    /// per restaurant). Documents are written with `set`; `create` fails with
    /// [`FrameworkError::NoIdGenerator`].
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(
        buffer_size: usize,
        next_id_fn: Option<Box<dyn Fn() -> T::Id + Send + Sync>>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            watchers: Vec::new(),
            next_id_fn,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is gone.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Table" instead of "tableside::model::table::Table")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let Some(next_id) = self.next_id_fn.as_ref() else {
                        warn!(entity_type, "Create on keyed collection");
                        let _ = respond_to.send(Err(FrameworkError::NoIdGenerator));
                        continue;
                    };
                    let id = next_id();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            self.publish(None, &id);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Set { id, item, respond_to } => {
                    let before = self.store.insert(id.clone(), item);
                    info!(entity_type, %id, replaced = before.is_some(), "Set");
                    self.publish(before, &id);
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        let before = item.clone();
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            *item = before;
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        let updated = item.clone();
                        info!(entity_type, %id, "Updated");
                        self.publish(Some(before), &id);
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        let before = self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        self.publish(before, &id);
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let before = item.clone();
                        match item.handle_action(action, &context).await {
                            Ok(result) => {
                                info!(entity_type, %id, "Action ok");
                                self.publish(Some(before), &id);
                                let _ = respond_to.send(Ok(result));
                            }
                            Err(e) => {
                                warn!(entity_type, %id, error = %e, "Action failed");
                                *item = before;
                                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            }
                        }
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = snapshot(&self.store, &filter);
                    debug!(entity_type, count = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Subscribe { filter, respond_to } => {
                    let (sender, subscription) = Subscription::channel();
                    let _ = sender.send(snapshot(&self.store, &filter));
                    self.watchers.push(Watcher { filter, sender });
                    info!(entity_type, watchers = self.watchers.len(), "Subscribed");
                    let _ = respond_to.send(Ok(subscription));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Pushes a fresh snapshot to every watcher that could see the change to `id`.
    fn publish(&mut self, before: Option<T>, id: &T::Id) {
        self.watchers.retain(|w| !w.sender.is_closed());

        let after = self.store.get(id);
        for watcher in &self.watchers {
            let was_visible = before.as_ref().is_some_and(|b| watcher.filter.matches(b));
            let is_visible = after.is_some_and(|a| watcher.filter.matches(a));
            if was_visible || is_visible {
                let _ = watcher.sender.send(snapshot(&self.store, &watcher.filter));
            }
        }
    }
}

fn snapshot<K, T: Clone>(store: &HashMap<K, T>, filter: &Filter<T>) -> Vec<T> {
    store.values().filter(|item| filter.matches(item)).cloned().collect()
}
