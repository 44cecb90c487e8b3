//! # Live Subscriptions
//!
//! A [`Subscription`] is the receiving end of a live query. The actor pushes a full
//! filtered snapshot (never a diff) when the subscription opens and again after
//! every change to a document that matched the filter before or after the change.
//!
//! Each subscriber holds at most one pending snapshot. A slow reader skips the
//! intermediate ones and wakes up to the newest state of the collection.
//!
//! Closing is explicit: call [`Subscription::close`] or drop it. The actor prunes
//! closed subscribers on its next fan-out.

use tokio::sync::watch;

/// Receiving half of a live query.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<Vec<T>>,
}

impl<T: Clone> Subscription<T> {
    /// Creates a connected sender/subscription pair with nothing pending yet.
    ///
    /// The actor keeps the sender; tests can use it to feed snapshots by hand.
    pub fn channel() -> (watch::Sender<Vec<T>>, Self) {
        let (sender, receiver) = watch::channel(Vec::new());
        (sender, Self { receiver })
    }

    /// Waits for the next snapshot. `None` once the store side has shut down
    /// and the last snapshot has been read.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Returns the pending snapshot, if any, without waiting.
    pub fn try_next(&mut self) -> Option<Vec<T>> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.receiver.borrow_and_update().clone()),
            _ => None,
        }
    }

    /// Stops the feed. A pending snapshot is discarded.
    pub fn close(self) {
        drop(self.receiver);
    }
}
