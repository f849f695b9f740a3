use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use folio_core::ports::{
    ContextId, SharedStoreHub, SharedStorePort, StoreSubscription,
};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::bus::StoreBus;

/// Durable shared store hub backed by one JSON object file.
///
/// Values survive process restarts; every write rewrites the file through a
/// temp-file-and-rename so readers of the file see either the previous
/// contents or the fully written new contents, never a torn write.
///
/// Notification stays hub-scoped (in-process): the hub, not the file, is
/// the notification domain. Two processes opening the same file share data
/// but not change events, the same way two browsers sharing a profile
/// directory would.
#[derive(Clone)]
pub struct FileSharedStore {
    inner: Arc<FileState>,
}

struct FileState {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
    bus: Arc<StoreBus>,
}

impl FileSharedStore {
    /// Open (or create) the store at `path`. A missing file is an empty
    /// store; an unreadable or corrupt file is an error, since silently
    /// starting empty would shadow persisted data.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parse shared store failed: {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read shared store failed: {}", path.display()))
            }
        };

        Ok(Self {
            inner: Arc::new(FileState {
                path,
                values: Mutex::new(values),
                bus: StoreBus::new(),
            }),
        })
    }

    /// Open a new context handle onto this hub.
    pub fn context(&self) -> FileStoreContext {
        FileStoreContext {
            context: ContextId::new(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedStoreHub for FileSharedStore {
    fn context(&self) -> Arc<dyn SharedStorePort> {
        Arc::new(FileSharedStore::context(self))
    }
}

pub struct FileStoreContext {
    context: ContextId,
    inner: Arc<FileState>,
}

impl FileState {
    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write the full map to disk through a temp file + rename.
    async fn persist(&self, values: &HashMap<String, String>) -> Result<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(values).context("serialize shared store")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), "persisted shared store");
        Ok(())
    }
}

#[async_trait]
impl SharedStorePort for FileStoreContext {
    fn context_id(&self) -> ContextId {
        self.context
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let values = self.inner.values.lock().await;
        Ok(values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        // The lock is held across persist + publish: writes serialize, and
        // notification order is write order. Memory is only updated once
        // the file write succeeded, so a failed write changes nothing
        // observable.
        let mut values = self.inner.values.lock().await;
        let mut candidate = values.clone();
        candidate.insert(key.to_string(), value.to_string());
        self.inner.persist(&candidate).await?;
        *values = candidate;
        self.inner.bus.publish(key, Some(value), self.context);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.inner.values.lock().await;
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut candidate = values.clone();
        candidate.remove(key);
        self.inner.persist(&candidate).await?;
        *values = candidate;
        self.inner.bus.publish(key, None, self.context);
        Ok(())
    }

    fn subscribe(&self, key: &str) -> StoreSubscription {
        self.inner.bus.subscribe(key, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_path(dir: &tempfile::TempDir) -> std::path::PathBuf {
        dir.path().join("store.json")
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = store_path(&dir);

        {
            let store = FileSharedStore::open(&path).await.unwrap();
            let ctx = store.context();
            ctx.write("portfolioItems", r#"[{"id":1}]"#).await.unwrap();
        }

        let reopened = FileSharedStore::open(&path).await.unwrap();
        let ctx = reopened.context();
        assert_eq!(
            ctx.read("portfolioItems").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileSharedStore::open(store_path(&dir)).await.unwrap();
        let ctx = store.context();
        assert_eq!(ctx.read("portfolioItems").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_not_an_empty_store() {
        let dir = tempdir().unwrap();
        let path = store_path(&dir);
        tokio::fs::write(&path, "not json").await.unwrap();

        assert!(FileSharedStore::open(&path).await.is_err());
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = store_path(&dir);
        let store = FileSharedStore::open(&path).await.unwrap();
        store.context().write("k", "v").await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn cross_context_notification_matches_memory_store() {
        let dir = tempdir().unwrap();
        let store = FileSharedStore::open(store_path(&dir)).await.unwrap();
        let writer = store.context();
        let reader = store.context();

        let mut sub = reader.subscribe("portfolioItems");
        writer.write("portfolioItems", "[]").await.unwrap();
        assert_eq!(sub.changed().await.unwrap().value.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn remove_persists_the_deletion() {
        let dir = tempdir().unwrap();
        let path = store_path(&dir);

        {
            let store = FileSharedStore::open(&path).await.unwrap();
            let ctx = store.context();
            ctx.write("portfolioItems", "[]").await.unwrap();
            ctx.remove("portfolioItems").await.unwrap();
        }

        let reopened = FileSharedStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.context().read("portfolioItems").await.unwrap(),
            None
        );
    }
}
