use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use folio_core::ports::{
    ContextId, SharedStoreHub, SharedStorePort, StoreSubscription,
};

use super::bus::StoreBus;

/// In-process shared store hub.
///
/// Nothing is persisted; data lives as long as the hub. This is the store
/// for same-process multi-view setups and for tests that need the full
/// cross-context notification contract without touching disk.
#[derive(Clone)]
pub struct MemorySharedStore {
    inner: Arc<MemoryState>,
}

struct MemoryState {
    values: Mutex<HashMap<String, String>>,
    bus: Arc<StoreBus>,
}

impl MemorySharedStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryState {
                values: Mutex::new(HashMap::new()),
                bus: StoreBus::new(),
            }),
        }
    }

    /// Open a new context handle. Each call is a fresh context: writes
    /// through one handle notify subscriptions on all the others.
    pub fn context(&self) -> MemoryStoreContext {
        MemoryStoreContext {
            context: ContextId::new(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for MemorySharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStoreHub for MemorySharedStore {
    fn context(&self) -> Arc<dyn SharedStorePort> {
        Arc::new(MemorySharedStore::context(self))
    }
}

pub struct MemoryStoreContext {
    context: ContextId,
    inner: Arc<MemoryState>,
}

#[async_trait]
impl SharedStorePort for MemoryStoreContext {
    fn context_id(&self) -> ContextId {
        self.context
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let values = self.inner.values.lock().expect("store lock poisoned");
        Ok(values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        // Publish while the value lock is held so notification order is
        // write order.
        let mut values = self.inner.values.lock().expect("store lock poisoned");
        values.insert(key.to_string(), value.to_string());
        self.inner.bus.publish(key, Some(value), self.context);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.inner.values.lock().expect("store lock poisoned");
        if values.remove(key).is_some() {
            self.inner.bus.publish(key, None, self.context);
        }
        Ok(())
    }

    fn subscribe(&self, key: &str) -> StoreSubscription {
        self.inner.bus.subscribe(key, self.context)
    }
}
