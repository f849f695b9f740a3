//! Notification bus shared by the store hubs.
//!
//! Delivery rules (the platform contract the stores must preserve):
//! - a change is fanned out to every subscriber of the key whose context id
//!   differs from the writer's; the writer's own subscriptions stay silent
//! - changes for one key are delivered in publish order; callers publish
//!   while still holding the value lock so publish order is write order
//! - a dropped subscription unregisters itself; dead channels discovered at
//!   publish time are pruned

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use folio_core::ports::{ContextId, StoreChange, StoreSubscription};
use tokio::sync::mpsc;

pub(crate) struct StoreBus {
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,
    next_token: AtomicU64,
}

struct Subscriber {
    token: u64,
    context: ContextId,
    tx: mpsc::UnboundedSender<StoreChange>,
}

impl StoreBus {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(0),
        })
    }

    pub(crate) fn subscribe(self: &Arc<Self>, key: &str, context: ContextId) -> StoreSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);

        self.subscribers
            .lock()
            .expect("store bus lock poisoned")
            .entry(key.to_string())
            .or_default()
            .push(Subscriber { token, context, tx });

        let bus = Arc::clone(self);
        let release_key = key.to_string();
        StoreSubscription::new(key, rx, move || bus.unsubscribe(&release_key, token))
    }

    fn unsubscribe(&self, key: &str, token: u64) {
        let mut subscribers = self.subscribers.lock().expect("store bus lock poisoned");
        if let Some(subs) = subscribers.get_mut(key) {
            subs.retain(|s| s.token != token);
            if subs.is_empty() {
                subscribers.remove(key);
            }
        }
    }

    /// Fan a change out to every other context subscribed to `key`.
    pub(crate) fn publish(&self, key: &str, value: Option<&str>, origin: ContextId) {
        let mut subscribers = self.subscribers.lock().expect("store bus lock poisoned");
        let Some(subs) = subscribers.get_mut(key) else {
            return;
        };
        subs.retain(|sub| {
            if sub.context == origin {
                return true;
            }
            sub.tx
                .send(StoreChange {
                    key: key.to_string(),
                    value: value.map(str::to_string),
                })
                .is_ok()
        });
        if subs.is_empty() {
            subscribers.remove(key);
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self, key: &str) -> usize {
        self.subscribers
            .lock()
            .expect("store bus lock poisoned")
            .get(key)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_other_contexts_only() {
        let bus = StoreBus::new();
        let writer = ContextId::new();
        let reader = ContextId::new();

        let mut writer_sub = bus.subscribe("k", writer);
        let mut reader_sub = bus.subscribe("k", reader);

        bus.publish("k", Some("v1"), writer);

        let change = reader_sub.changed().await.unwrap();
        assert_eq!(change.key, "k");
        assert_eq!(change.value.as_deref(), Some("v1"));

        // The writer's own subscription saw nothing.
        bus.publish("k", Some("v2"), reader);
        let change = writer_sub.changed().await.unwrap();
        assert_eq!(change.value.as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn preserves_publish_order() {
        let bus = StoreBus::new();
        let writer = ContextId::new();
        let mut sub = bus.subscribe("k", ContextId::new());

        for i in 0..10 {
            bus.publish("k", Some(&format!("v{i}")), writer);
        }
        for i in 0..10 {
            assert_eq!(
                sub.changed().await.unwrap().value.as_deref(),
                Some(format!("v{i}").as_str())
            );
        }
    }

    #[tokio::test]
    async fn drop_unregisters_the_handler() {
        let bus = StoreBus::new();
        let sub = bus.subscribe("k", ContextId::new());
        assert_eq!(bus.subscriber_count("k"), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count("k"), 0);
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let bus = StoreBus::new();
        let writer = ContextId::new();
        let mut other_key = bus.subscribe("other", ContextId::new());

        bus.publish("k", Some("v"), writer);
        bus.publish("other", Some("w"), writer);

        // The first change seen under "other" is its own write, not "k"'s.
        assert_eq!(other_key.changed().await.unwrap().value.as_deref(), Some("w"));
    }
}
