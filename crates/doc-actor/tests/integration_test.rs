use doc_actor::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    id: u32,
    owner: String,
    items: Vec<String>,
}

#[derive(Debug)]
struct ShelfCreate {
    owner: String,
}

#[derive(Debug)]
struct ShelfUpdate {
    owner: Option<String>,
}

#[derive(Debug)]
enum ShelfAction {
    Push(String),
    Swap { from: String, to: String },
}

#[derive(Debug, thiserror::Error)]
enum ShelfError {
    #[error("owner must not be empty")]
    EmptyOwner,
    #[error("missing item {0}")]
    Missing(String),
}

#[async_trait]
impl ActorEntity for Shelf {
    type Id = u32;
    type Create = ShelfCreate;
    type Update = ShelfUpdate;
    type Action = ShelfAction;
    type ActionResult = usize;
    type Context = ();
    type Error = ShelfError;

    fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
        if params.owner.is_empty() {
            return Err(ShelfError::EmptyOwner);
        }
        Ok(Self {
            id,
            owner: params.owner,
            items: Vec::new(),
        })
    }

    async fn on_update(&mut self, update: ShelfUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(owner) = update.owner {
            if owner.is_empty() {
                return Err(ShelfError::EmptyOwner);
            }
            self.owner = owner;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ShelfAction, _ctx: &()) -> Result<usize, Self::Error> {
        match action {
            ShelfAction::Push(item) => self.items.push(item),
            ShelfAction::Swap { from, to } => {
                let slot = self
                    .items
                    .iter_mut()
                    .find(|i| **i == from)
                    .ok_or(ShelfError::Missing(from))?;
                *slot = to;
            }
        }
        Ok(self.items.len())
    }
}

fn spawn_shelves() -> ResourceClient<Shelf> {
    let counter = Arc::new(AtomicU32::new(1));
    let (actor, client) = ResourceActor::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
    tokio::spawn(actor.run(()));
    client
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = spawn_shelves();

    let id = client
        .create(ShelfCreate {
            owner: "alice".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    let len = client
        .perform_action(id, ShelfAction::Push("salt".into()))
        .await
        .unwrap();
    assert_eq!(len, 1);

    let updated = client
        .update(
            id,
            ShelfUpdate {
                owner: Some("bob".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.owner, "bob");
    assert_eq!(updated.items, vec!["salt".to_string()]);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(client.delete(id).await, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_failed_hooks_leave_document_untouched() {
    let client = spawn_shelves();

    let rejected = client.create(ShelfCreate { owner: String::new() }).await;
    let err = rejected.unwrap_err().downcast_entity::<ShelfError>().unwrap();
    assert!(matches!(err, ShelfError::EmptyOwner));

    let id = client.create(ShelfCreate { owner: "carol".into() }).await.unwrap();
    client
        .perform_action(id, ShelfAction::Push("pepper".into()))
        .await
        .unwrap();

    let failed = client
        .perform_action(
            id,
            ShelfAction::Swap {
                from: "sugar".into(),
                to: "honey".into(),
            },
        )
        .await;
    assert!(matches!(
        failed.unwrap_err().downcast_entity::<ShelfError>(),
        Ok(ShelfError::Missing(_))
    ));

    let bad_update = client
        .update(id, ShelfUpdate { owner: Some(String::new()) })
        .await;
    assert!(bad_update.is_err());

    let shelf = client.get(id).await.unwrap().unwrap();
    assert_eq!(shelf.owner, "carol");
    assert_eq!(shelf.items, vec!["pepper".to_string()]);
}

#[tokio::test]
async fn test_set_overwrites_and_query_filters() {
    let client = spawn_shelves();

    for owner in ["alice", "bob", "alice"] {
        client.create(ShelfCreate { owner: owner.into() }).await.unwrap();
    }
    client
        .set(
            2,
            Shelf {
                id: 2,
                owner: "alice".into(),
                items: vec!["oil".into()],
            },
        )
        .await
        .unwrap();
    client
        .set(
            40,
            Shelf {
                id: 40,
                owner: "dave".into(),
                items: Vec::new(),
            },
        )
        .await
        .unwrap();

    let alice = client.query(|s: &Shelf| s.owner == "alice").await.unwrap();
    assert_eq!(alice.len(), 3);
    assert!(client.get(40).await.unwrap().is_some());
}

#[tokio::test]
async fn test_concurrent_actions_never_lose_writes() {
    let client = spawn_shelves();
    let id = client.create(ShelfCreate { owner: "eve".into() }).await.unwrap();

    let mut handles = vec![];
    for i in 0..20 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .perform_action(id, ShelfAction::Push(format!("jar_{i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let shelf = client.get(id).await.unwrap().unwrap();
    assert_eq!(shelf.items.len(), 20);
}

#[tokio::test]
async fn test_subscription_delivers_full_snapshots() {
    let client = spawn_shelves();
    let first = client.create(ShelfCreate { owner: "alice".into() }).await.unwrap();

    let mut feed = client.subscribe(|s: &Shelf| s.owner == "alice").await.unwrap();
    let initial = feed.next().await.unwrap();
    assert_eq!(initial.len(), 1);

    // Not visible to the filter: no snapshot.
    client.create(ShelfCreate { owner: "bob".into() }).await.unwrap();

    let second = client.create(ShelfCreate { owner: "alice".into() }).await.unwrap();
    assert_eq!(feed.next().await.unwrap().len(), 2);

    client
        .perform_action(second, ShelfAction::Push("rice".into()))
        .await
        .unwrap();
    let after_push = feed.next().await.unwrap();
    assert!(after_push.iter().any(|s| s.items == vec!["rice".to_string()]));

    // Leaving the filter is a change too.
    client
        .update(first, ShelfUpdate { owner: Some("zoe".into()) })
        .await
        .unwrap();
    assert_eq!(feed.next().await.unwrap().len(), 1);

    client.delete(second).await.unwrap();
    assert!(feed.next().await.unwrap().is_empty());
    assert!(feed.try_next().is_none());
}

#[tokio::test]
async fn test_each_subscriber_gets_its_own_feed() {
    let client = spawn_shelves();

    let mut a = client.subscribe(|_: &Shelf| true).await.unwrap();
    let b = client.subscribe(|_: &Shelf| true).await.unwrap();
    assert!(a.next().await.unwrap().is_empty());

    b.close();
    client.create(ShelfCreate { owner: "amy".into() }).await.unwrap();
    assert_eq!(a.next().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_keyed_collection_rejects_create() {
    let (actor, client) = ResourceActor::<Shelf>::keyed(10);
    tokio::spawn(actor.run(()));

    let result = client.create(ShelfCreate { owner: "fay".into() }).await;
    assert!(matches!(result, Err(FrameworkError::NoIdGenerator)));

    client
        .set(
            9,
            Shelf {
                id: 9,
                owner: "fay".into(),
                items: Vec::new(),
            },
        )
        .await
        .unwrap();
    assert_eq!(client.get(9).await.unwrap().unwrap().owner, "fay");
}

#[tokio::test]
async fn test_slow_subscriber_only_holds_latest_snapshot() {
    let client = spawn_shelves();
    let mut feed = client.subscribe(|_: &Shelf| true).await.unwrap();

    for i in 0..50 {
        client.create(ShelfCreate { owner: format!("owner {i}") }).await.unwrap();
    }

    // Fifty writes while nobody read: one pending snapshot with everything in it.
    assert_eq!(feed.next().await.unwrap().len(), 50);
    assert!(feed.try_next().is_none());
}
