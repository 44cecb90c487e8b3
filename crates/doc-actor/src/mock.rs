//! # Mock Store & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test client-side logic (validation, error mapping, snapshot shaping) without
//! spawning collection actors, and to inject failures a real actor would never
//! produce on demand.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Determinism** | Fully scripted | Subject to scheduler |
//! | **State** | None (expectations) | Real documents |
//! | **Use Case** | Logic *around* the client | The document rules or the whole system |
//! | **Error Injection** | Easy (`return_err`) | Hard |
//!
//! ## Testing Failure Scenarios
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Table>::new();
//! mock.expect_action(TableId(1)).return_err(FrameworkError::ActorClosed);
//!
//! let tables = TableClient::new(mock.client());
//! let result = tables.append_order(TableId(1), order).await;
//! assert!(matches!(result, Err(TableError::Store(_))));
//! mock.verify();
//! ```
//!
//! ## Scripting Live Queries
//!
//! `expect_subscribe().return_feed()` returns the sending half of the subscription,
//! so a test decides exactly which snapshots the code under test sees.
//!
//! ## Low-level helpers
//!
//! [`create_mock_client`] plus [`expect_action`] give raw access to each request
//! (including its payload) and let the test answer it by hand.

use crate::message::{Filter, ResourceRequest};
use crate::subscription::Subscription;
use crate::{ActorEntity, FrameworkError, ResourceClient};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Set {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
    Subscribe {
        response: Result<Subscription<T>, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order. A request of the wrong
/// kind, or for a different id, drops its response channel, which the caller sees
/// as [`FrameworkError::ActorDropped`], and is recorded as a mismatch that
/// [`MockClient::verify`] reports.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let errors = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                answer(request, expectation, &errors);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> Respond<T, Option<T>> {
        self.respond(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> Respond<T, T::Id> {
        self.respond(|response| Expectation::Create { response })
    }

    pub fn expect_set(&mut self, id: T::Id) -> Respond<T, ()> {
        self.respond(move |response| Expectation::Set { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Respond<T, ()> {
        self.respond(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Respond<T, T::ActionResult> {
        self.respond(move |response| Expectation::Action { id, response })
    }

    pub fn expect_query(&mut self) -> Respond<T, Vec<T>> {
        self.respond(|response| Expectation::Query { response })
    }

    /// Expects a `subscribe` request.
    pub fn expect_subscribe(&mut self) -> SubscribeExpectation<T> {
        SubscribeExpectation {
            expectations: self.expectations.clone(),
        }
    }

    fn respond<R: 'static>(
        &mut self,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Respond<T, R> {
        Respond {
            build: Box::new(build),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", *mismatches);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending expectation; finish it with [`Respond::return_ok`] or [`Respond::return_err`].
pub struct Respond<T: ActorEntity, R> {
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> Respond<T, R> {
    pub fn return_ok(self, value: R) {
        let expectation = (self.build)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.build)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Builder for `subscribe` expectations.
pub struct SubscribeExpectation<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> SubscribeExpectation<T> {
    /// Answers the subscribe request with a live feed driven by the returned sender.
    pub fn return_feed(self) -> watch::Sender<Vec<T>> {
        let (sender, subscription) = Subscription::channel();
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Subscribe {
                response: Ok(subscription),
            });
        sender
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Subscribe { response: Err(error) });
    }
}

// Mismatches are recorded before the request (and its response channel) is
// dropped, so a caller that sees `ActorDropped` can already `verify()`.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
    errors: &Mutex<Vec<String>>,
) {
    let record = |message: String| errors.lock().unwrap().push(message);
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            if id != want {
                return record(format!("Get for {id}, expected {want}"));
            }
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Set { id, respond_to, .. }, Some(Expectation::Set { id: want, response })) => {
            if id != want {
                return record(format!("Set for {id}, expected {want}"));
            }
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
            if id != want {
                return record(format!("Delete for {id}, expected {want}"));
            }
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
            if id != want {
                return record(format!("Action for {id}, expected {want}"));
            }
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Subscribe { respond_to, .. }, Some(Expectation::Subscribe { response })) => {
            let _ = respond_to.send(response);
        }
        (request, _) => record(format!("unexpected {}", describe(&request))),
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::Set { .. } => "Set",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
        ResourceRequest::Query { .. } => "Query",
        ResourceRequest::Subscribe { .. } => "Subscribe",
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test reads each request off `receiver` and answers it through the
/// `respond_to` channel it carries, which allows asserting on payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Set.
pub async fn expect_set<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Set {
            id,
            item,
            respond_to,
        }) => Some((id, item, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns its filter if it is a Subscribe.
pub async fn expect_subscribe<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Filter<T>,
    oneshot::Sender<Result<Subscription<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Subscribe { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    #[async_trait]
    impl ActorEntity for Note {
        type Id = u32;
        type Create = String;
        type Update = ();
        type Action = ();
        type ActionResult = usize;
        type Context = ();
        type Error = NoteError;

        fn from_create_params(id: u32, text: String) -> Result<Self, NoteError> {
            Ok(Self { id, text })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<usize, NoteError> {
            Ok(self.text.len())
        }
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(7);
        mock.expect_get(7).return_ok(Some(Note {
            id: 7,
            text: "hi".into(),
        }));
        mock.expect_action(7).return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        assert_eq!(client.create("hi".into()).await.unwrap(), 7);
        assert_eq!(client.get(7).await.unwrap().unwrap().text, "hi");
        assert!(matches!(
            client.perform_action(7, ()).await,
            Err(FrameworkError::ActorClosed)
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_wrong_id_is_reported() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }

    #[tokio::test]
    async fn test_scripted_feed() {
        let mut mock = MockClient::<Note>::new();
        let feed = mock.expect_subscribe().return_feed();

        let mut sub = mock.client().subscribe(|_| true).await.unwrap();
        feed.send(vec![]).unwrap();
        assert_eq!(sub.next().await, Some(vec![]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_raw_action_helper() {
        let (client, mut receiver) = create_mock_client::<Note>(10);
        let task = tokio::spawn(async move { client.perform_action(3, ()).await });

        let (id, (), responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert_eq!(id, 3);
        responder.send(Ok(5)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 5);
    }
}
