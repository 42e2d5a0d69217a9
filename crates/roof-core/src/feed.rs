//! Identity feed: fans auth-state notifications out to subscribers.
//!
//! A gateway owns one [`IdentityFeed`] and publishes every identity change to
//! it. Each [`AuthSubscription`] receives notifications in publish order and
//! unregisters itself when dropped.
//!
//! ```text
//! unresolved --publish(x)--> resolved(x) --publish(y)--> resolved(y) ...
//! ```
//!
//! Subscribing to a resolved feed delivers the current state first, so a late
//! subscriber still gets its initial notification.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};

use crate::identity::Identity;

/// One auth-state notification: the signed-in identity, or `None` when signed out.
pub type Notification = Option<Identity>;

#[derive(Default)]
struct FeedState {
    /// `None` until the first publish.
    current: Option<Notification>,
    next_id: u64,
    subscribers: HashMap<u64, UnboundedSender<Notification>>,
}

/// Shared hub holding the latest auth state and its live subscribers.
#[derive(Clone, Default)]
pub struct IdentityFeed {
    state: Arc<Mutex<FeedState>>,
}

impl IdentityFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `notification` as the current state and deliver it to every subscriber.
    pub fn publish(&self, notification: Notification) {
        let mut state = self.lock();
        state.current = Some(notification.clone());
        state
            .subscribers
            .retain(|_, sender| sender.send(notification.clone()).is_ok());
        tracing::debug!(
            signed_in = state.current.as_ref().is_some_and(Option::is_some),
            subscribers = state.subscribers.len(),
            "published identity notification"
        );
    }

    /// Register a subscriber. A resolved state is delivered to it immediately.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.lock();
        if let Some(current) = &state.current {
            // The receiver is alive, so this cannot fail.
            let _ = sender.send(current.clone());
        }
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id, sender);
        tracing::debug!(subscription = id, "identity subscription acquired");

        AuthSubscription {
            id,
            receiver,
            feed: Arc::downgrade(&self.state),
        }
    }

    /// Latest published state; `None` before the first publish.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Live registration on an [`IdentityFeed`]. Dropping it unsubscribes.
pub struct AuthSubscription {
    id: u64,
    receiver: UnboundedReceiver<Notification>,
    feed: Weak<Mutex<FeedState>>,
}

impl AuthSubscription {
    /// Wait for the next notification.
    ///
    /// Returns `None` once the feed has been dropped and all pending
    /// notifications were delivered.
    pub async fn next(&mut self) -> Option<Notification> {
        self.receiver.recv().await
    }

    /// Take the next pending notification without waiting.
    pub fn try_next(&mut self) -> Option<Notification> {
        match self.receiver.try_recv() {
            Ok(notification) => Some(notification),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(state) = self.feed.upgrade() {
            state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .remove(&self.id);
        }
        tracing::debug!(subscription = self.id, "identity subscription released");
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
