use std::sync::{Arc, RwLock};

use folio_core::config::SiteConfig;
use folio_core::portfolio::category::available_categories;
use folio_core::portfolio::seed::seed_entries;
use folio_core::ports::SharedStorePort;
use folio_core::{CategoryFilter, PortfolioEntry, PortfolioList};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The public, read-only view of the portfolio.
///
/// A gallery never writes. It renders whatever the shared store holds,
/// falling back to the built-in seed list when the store has never been
/// written, and it treats every external change as a full replacement of
/// its in-memory list. A snapshot that fails to parse is ignored: the view
/// keeps showing the last good list instead of going blank.
pub struct GalleryView {
    store: Arc<dyn SharedStorePort>,
    portfolio_key: String,
    entries: Arc<RwLock<PortfolioList>>,
}

impl GalleryView {
    /// The view starts on the seed list so it is never empty, even before
    /// the initial `load`.
    pub fn new(store: Arc<dyn SharedStorePort>, config: &SiteConfig) -> Self {
        Self {
            store,
            portfolio_key: config.store.portfolio_key.clone(),
            entries: Arc::new(RwLock::new(seed_entries())),
        }
    }

    /// Initial load on mount: read the current snapshot from the store.
    /// Absent key falls back to the seed list; a corrupt snapshot or a
    /// failing store keeps the current list. Never fails the view.
    #[tracing::instrument(name = "gallery.load", skip_all)]
    pub async fn load(&self) -> PortfolioList {
        match self.store.read(&self.portfolio_key).await {
            Ok(value) => Self::apply(&self.entries, value.as_deref()),
            Err(err) => {
                warn!(%err, "shared store read failed, keeping current list");
            }
        }
        self.entries()
    }

    /// Handle one external change notification: full replace, never a
    /// merge. `None` (key deleted) falls back to the seed list.
    pub fn apply_snapshot(&self, value: Option<&str>) {
        Self::apply(&self.entries, value);
    }

    /// Spawn the subscription loop feeding external changes into this view.
    /// The returned watcher owns the loop: dropping it (or calling `stop`)
    /// ends the task and unregisters the store subscription, which is the
    /// teardown the view must perform before going away.
    pub fn watch(&self) -> GalleryWatcher {
        let mut subscription = self.store.subscribe(&self.portfolio_key);
        let entries = Arc::clone(&self.entries);
        let task = tokio::spawn(async move {
            while let Some(change) = subscription.changed().await {
                debug!(key = %change.key, absent = change.value.is_none(), "external store change");
                Self::apply(&entries, change.value.as_deref());
            }
        });
        GalleryWatcher { task }
    }

    /// Current list, in display order.
    pub fn entries(&self) -> PortfolioList {
        self.entries.read().expect("gallery lock poisoned").clone()
    }

    /// The matching entries in original order; `CategoryFilter::All` is the
    /// identity.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<PortfolioEntry> {
        let entries = self.entries.read().expect("gallery lock poisoned");
        filter.apply(&entries).into_iter().cloned().collect()
    }

    /// Filter buttons to offer: `all` plus the distinct categories present.
    pub fn categories(&self) -> Vec<String> {
        let entries = self.entries.read().expect("gallery lock poisoned");
        available_categories(&entries)
    }

    fn apply(entries: &RwLock<PortfolioList>, value: Option<&str>) {
        let next = match value {
            Some(raw) => match PortfolioList::decode(raw) {
                Ok(list) => list,
                Err(err) => {
                    warn!(%err, "ignoring unparsable portfolio snapshot");
                    return;
                }
            },
            None => seed_entries(),
        };
        *entries.write().expect("gallery lock poisoned") = next;
    }
}

/// Handle on a running gallery subscription loop. Dropping it tears the
/// loop down; the store subscription inside is released with the task.
pub struct GalleryWatcher {
    task: JoinHandle<()>,
}

impl GalleryWatcher {
    /// Explicit teardown; equivalent to dropping the watcher.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for GalleryWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_infra::MemorySharedStore;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    const KEY: &str = "portfolioItems";

    fn gallery(store: &MemorySharedStore) -> GalleryView {
        GalleryView::new(Arc::new(store.context()), &SiteConfig::default())
    }

    fn snapshot(titles_and_categories: &[(&str, &str)]) -> String {
        let list: PortfolioList = titles_and_categories
            .iter()
            .enumerate()
            .map(|(i, (title, category))| PortfolioEntry {
                id: folio_core::EntryId::new(i as i64 + 1),
                title: (*title).into(),
                category: (*category).into(),
                image_url: format!("https://example.com/{i}.jpg"),
                description: None,
                link: None,
            })
            .collect();
        list.encode().unwrap()
    }

    async fn wait_until(view: &GalleryView, len: usize) {
        timeout(Duration::from_secs(1), async {
            loop {
                if view.entries().len() == len {
                    return;
                }
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("gallery never caught up");
    }

    #[tokio::test]
    async fn load_falls_back_to_seed_when_absent() {
        let store = MemorySharedStore::new();
        let view = gallery(&store);

        let list = view.load().await;
        assert_eq!(list, seed_entries());
    }

    #[tokio::test]
    async fn load_is_idempotent_without_intervening_writes() {
        let store = MemorySharedStore::new();
        store
            .context()
            .write(KEY, &snapshot(&[("One", "Photography")]))
            .await
            .unwrap();
        let view = gallery(&store);

        let first = view.load().await;
        let second = view.load().await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_snapshot_keeps_the_last_good_list() {
        let store = MemorySharedStore::new();
        store
            .context()
            .write(KEY, &snapshot(&[("One", "Photography")]))
            .await
            .unwrap();
        let view = gallery(&store);
        view.load().await;

        view.apply_snapshot(Some("not json at all"));
        assert_eq!(view.entries().len(), 1);
        assert_eq!(view.entries().entries()[0].title, "One");
    }

    #[tokio::test]
    async fn deleted_key_falls_back_to_seed() {
        let store = MemorySharedStore::new();
        store
            .context()
            .write(KEY, &snapshot(&[("One", "Photography")]))
            .await
            .unwrap();
        let view = gallery(&store);
        view.load().await;

        view.apply_snapshot(None);
        assert_eq!(view.entries(), seed_entries());
    }

    #[tokio::test]
    async fn watch_applies_external_writes_as_full_replacements() {
        let store = MemorySharedStore::new();
        let view = gallery(&store);
        view.load().await;
        let _watcher = view.watch();

        let writer = store.context();
        writer
            .write(KEY, &snapshot(&[("One", "Photography"), ("Two", "UI Design")]))
            .await
            .unwrap();
        wait_until(&view, 2).await;

        writer
            .write(KEY, &snapshot(&[("Three", "Digital Art")]))
            .await
            .unwrap();
        wait_until(&view, 1).await;
        assert_eq!(view.entries().entries()[0].title, "Three");
    }

    #[tokio::test]
    async fn dropped_watcher_stops_applying_changes() {
        let store = MemorySharedStore::new();
        let view = gallery(&store);
        view.load().await;

        let watcher = view.watch();
        drop(watcher);
        // Give the aborted task a moment to die before writing.
        sleep(Duration::from_millis(20)).await;

        store
            .context()
            .write(KEY, &snapshot(&[("One", "Photography")]))
            .await
            .unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(view.entries(), seed_entries());
    }

    #[tokio::test]
    async fn filter_and_categories_follow_the_current_list() {
        let store = MemorySharedStore::new();
        let view = gallery(&store);
        view.load().await;

        assert_eq!(
            view.categories(),
            vec!["all", "Brand Identity", "Digital Art", "UI Design"]
        );

        let hits = view.filter(&CategoryFilter::parse("ui design"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Vibrant Gradients");

        let all = view.filter(&CategoryFilter::All);
        assert_eq!(all.len(), 3);
    }
}
