//! Subscriber registry and best-effort broadcast.
//!
//! Every subscriber owns a capacity-1 channel. Broadcasting is a `try_send`
//! on each: if the slot already holds an unread notification the new one is
//! dropped, so a subscriber has at most one pending wake-up and a slow
//! subscriber can never block the broadcaster.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::types::SubscriberId;

/// The receiving half handed to a registered subscriber.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    notifications: mpsc::Receiver<()>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Waits for the next store-changed notification.
    ///
    /// Returns `None` once the subscriber has been unregistered and any
    /// pending notification has been consumed.
    pub async fn notified(&mut self) -> Option<()> {
        self.notifications.recv().await
    }

    /// Consumes a pending notification without waiting.
    pub fn try_notified(&mut self) -> bool {
        self.notifications.try_recv().is_ok()
    }
}

/// Counts from one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// Subscribers whose slot was empty and now holds a notification.
    pub delivered: usize,
    /// Subscribers that still had an unread notification.
    pub coalesced: usize,
    /// Subscribers whose receiver was gone; they are removed.
    pub pruned: usize,
}

/// The set of registered subscribers.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    senders: HashMap<SubscriberId, mpsc::Sender<()>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) -> Subscription {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (tx, rx) = mpsc::channel(1);
        self.senders.insert(id, tx);

        Subscription {
            id,
            notifications: rx,
        }
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unregister(&mut self, id: SubscriberId) -> bool {
        self.senders.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Wakes every subscriber without blocking.
    pub fn notify_all(&mut self) -> NotifyOutcome {
        let mut outcome = NotifyOutcome::default();
        let mut closed = Vec::new();

        for (id, tx) in &self.senders {
            match tx.try_send(()) {
                Ok(()) => outcome.delivered += 1,
                Err(TrySendError::Full(())) => {
                    trace!(subscriber = %id, "Notification already pending");
                    outcome.coalesced += 1;
                }
                Err(TrySendError::Closed(())) => closed.push(*id),
            }
        }

        for id in closed {
            self.senders.remove(&id);
            outcome.pruned += 1;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_unregister_leaves_registry_empty() {
        let mut registry = SubscriberRegistry::new();
        let sub = registry.register();
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(sub.id()));
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_unknown_id_returns_false() {
        let mut registry = SubscriberRegistry::new();
        assert!(!registry.unregister(SubscriberId(42)));
    }

    #[test]
    fn ids_are_unique() {
        let mut registry = SubscriberRegistry::new();
        let a = registry.register();
        let b = registry.register();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn notify_on_empty_registry_is_noop() {
        let mut registry = SubscriberRegistry::new();
        assert_eq!(registry.notify_all(), NotifyOutcome::default());
    }

    #[test]
    fn pending_notification_is_not_duplicated() {
        let mut registry = SubscriberRegistry::new();
        let mut sub = registry.register();

        let first = registry.notify_all();
        let second = registry.notify_all();

        assert_eq!(first.delivered, 1);
        assert_eq!(second.delivered, 0);
        assert_eq!(second.coalesced, 1);

        assert!(sub.try_notified());
        assert!(!sub.try_notified(), "only one notification may be pending");
    }

    #[test]
    fn notification_is_delivered_again_after_consumption() {
        let mut registry = SubscriberRegistry::new();
        let mut sub = registry.register();

        registry.notify_all();
        assert!(sub.try_notified());

        assert_eq!(registry.notify_all().delivered, 1);
        assert!(sub.try_notified());
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let mut registry = SubscriberRegistry::new();
        let sub = registry.register();
        let _kept = registry.register();
        drop(sub);

        let outcome = registry.notify_all();
        assert_eq!(outcome.pruned, 1);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn unregistered_subscription_sees_end_of_stream() {
        let mut registry = SubscriberRegistry::new();
        let mut sub = registry.register();
        registry.notify_all();
        registry.unregister(sub.id());

        assert_eq!(sub.notified().await, Some(()));
        assert_eq!(sub.notified().await, None);
    }
}
