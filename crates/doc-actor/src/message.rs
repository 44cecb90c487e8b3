//! # Generic Messages
//!
//! Request types sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::subscription::Subscription;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A document predicate used by queries and live subscriptions.
///
/// Shared (`Arc`) because a live subscription keeps evaluating it for as long as
/// the subscriber stays open.
pub struct Filter<T>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Matches every document in the collection.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants mirror the primitives of a document database:
///
/// - **Create**: add a document under a generated id.
/// - **Get**: read one document by id.
/// - **Set**: overwrite (or insert) a document under a caller-chosen id.
/// - **Update**: mutate an existing document through [`ActorEntity::on_update`].
/// - **Delete**: remove a document.
/// - **Action**: run a custom atomic [`ActorEntity::Action`] against one document.
/// - **Query**: one-off filtered snapshot of the collection.
/// - **Subscribe**: live filtered snapshots, pushed on every relevant change.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Set {
        id: T::Id,
        item: T,
        respond_to: Response<()>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Subscribe {
        filter: Filter<T>,
        respond_to: Response<Subscription<T>>,
    },
}
