//! Concurrent alert store with its area index and subscriber registry.
//!
//! A single `tokio::sync::Mutex` guards the alert maps, the parsed areas and
//! the subscriber set together. All reads and writes go through it:
//!
//! - The poller takes the lock once per polling pass and holds it across every
//!   feed fetch and [`StoreState::update_source`] call, then broadcasts while
//!   still holding it. Queries wait for the whole pass.
//! - Queries ([`AlertStore::all_alerts`], [`AlertStore::matching_alerts`])
//!   take the lock for the duration of one scan and return owned snapshots.
//! - Sessions take it briefly to subscribe and unsubscribe.
//!
//! The lock is async because the poller awaits network I/O while holding it.

use tokio::sync::{Mutex, MutexGuard};

use crate::geometry::Location;
use crate::types::{Alert, SubscriberId};

mod state;
mod subscribers;

pub use state::{StoreState, UpdateError};
pub use subscribers::{NotifyOutcome, SubscriberRegistry, Subscription};

/// Shared handle to the alert store.
///
/// Wrap in an `Arc` to share between the poller and the sessions.
#[derive(Debug, Default)]
pub struct AlertStore {
    state: Mutex<StoreState>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the store lock.
    ///
    /// Used by the poller to apply a whole pass of source updates atomically.
    pub async fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().await
    }

    /// Snapshot of every alert across every feed.
    pub async fn all_alerts(&self) -> Vec<Alert> {
        self.state.lock().await.all_alerts()
    }

    /// Snapshot of the alerts whose areas contain `point`.
    pub async fn matching_alerts(&self, point: Location) -> Vec<Alert> {
        self.state.lock().await.matching_alerts(point)
    }

    pub async fn subscribe(&self) -> Subscription {
        self.state.lock().await.register()
    }

    pub async fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.state.lock().await.unregister(id)
    }

    pub async fn notify_all(&self) -> NotifyOutcome {
        self.state.lock().await.notify_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{UNIT_SQUARE, sample_alert};
    use crate::types::FeedUrl;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn queries_see_committed_updates() {
        let store = AlertStore::new();
        {
            let mut state = store.lock().await;
            state
                .update_source(&FeedUrl::from("a"), vec![sample_alert("one", &[UNIT_SQUARE])])
                .unwrap();
        }

        assert_eq!(store.all_alerts().await.len(), 1);
        assert_eq!(store.matching_alerts(Location::new(0.0, 0.0)).await.len(), 1);
        assert!(store.matching_alerts(Location::new(5.0, 5.0)).await.is_empty());
    }

    #[tokio::test]
    async fn queries_wait_for_lock_holder() {
        let store = Arc::new(AlertStore::new());
        let guard = store.lock().await;

        let reader = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.all_alerts().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!reader.is_finished(), "query must block while the lock is held");

        drop(guard);
        let alerts = reader.await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn subscribe_notify_unsubscribe() {
        let store = AlertStore::new();
        let mut sub = store.subscribe().await;

        assert_eq!(store.notify_all().await.delivered, 1);
        assert_eq!(sub.notified().await, Some(()));

        assert!(store.unsubscribe(sub.id()).await);
        assert_eq!(store.notify_all().await, NotifyOutcome::default());
    }
}
