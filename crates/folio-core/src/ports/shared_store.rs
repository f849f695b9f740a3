//! SharedStore port - origin-scoped durable key-value storage with
//! cross-context change notification.
//!
//! One *context* is one independent view instance (the browser-tab analog).
//! Implementations hand out one port handle per context; all handles opened
//! from the same hub observe the same data.
//!
//! Contracts every implementation must preserve:
//! - `write` atomically replaces the full value; readers never observe a
//!   partial write.
//! - Every stored value is a complete snapshot. Subscribers treat each
//!   change as "replace my whole view", never as a delta.
//! - The writing context does NOT receive its own change notification; only
//!   other contexts subscribed to the key do. Do not "fix" this into
//!   self-notifying: cross-tab behavior and same-tab behavior must diverge
//!   exactly this way.
//! - Notifications for one key arrive in write order.
//! - Two concurrent writers: last write wins, silently. No locks, no
//!   version stamps.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier of one execution context (one open view of the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A change observed under a watched key. `value` is the full new raw value,
/// or `None` when the key was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    pub value: Option<String>,
}

/// Live registration of a change handler. Dropping it unregisters the
/// handler; holding it past the view's teardown is the resource leak the
/// design forbids, so views tie its lifetime to theirs.
pub struct StoreSubscription {
    key: String,
    rx: mpsc::UnboundedReceiver<StoreChange>,
    _release: ReleaseGuard,
}

impl StoreSubscription {
    /// Assemble a subscription from a change channel and the release action
    /// the implementation runs when the subscription is dropped.
    pub fn new(
        key: impl Into<String>,
        rx: mpsc::UnboundedReceiver<StoreChange>,
        on_release: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            rx,
            _release: ReleaseGuard(Some(Box::new(on_release))),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Next change from another context, in write order. `None` once the
    /// store side has gone away.
    pub async fn changed(&mut self) -> Option<StoreChange> {
        self.rx.recv().await
    }
}

impl fmt::Debug for StoreSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSubscription")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

struct ReleaseGuard(Option<Box<dyn FnOnce() + Send>>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

/// One context's handle onto the shared store.
#[async_trait]
pub trait SharedStorePort: Send + Sync {
    /// Which context this handle belongs to.
    fn context_id(&self) -> ContextId;

    /// Last written value under `key`, or `None` if never written.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Atomically replace the value under `key` and notify every *other*
    /// subscribed context. The caller's own subscriptions stay silent.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`; other contexts observe `None`.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Register this context for changes to `key` made by other contexts.
    fn subscribe(&self, key: &str) -> StoreSubscription;
}

/// Factory for context handles. One hub = one origin-scoped store.
pub trait SharedStoreHub: Send + Sync {
    fn context(&self) -> std::sync::Arc<dyn SharedStorePort>;
}
