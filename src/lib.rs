//! folio
//!
//! Shared-store synchronization core for a single-page portfolio site: one
//! password-gated admin writer, any number of gallery readers, and an
//! origin-scoped key-value store with cross-context change notification
//! between them.
//!
//! The store holds the whole portfolio list as one snapshot under one key
//! (`portfolioItems`). The admin panel persists the full list on every
//! successful mutation; open galleries in *other* contexts receive the new
//! snapshot and replace their view wholesale. The writing context never
//! hears its own writes.
//!
//! Known limitations, by design:
//! - the admin gate is a client-visible demo secret, not a security
//!   boundary; real deployments need a server-side credential check
//! - two concurrent admin sessions race: the last writer wins and silently
//!   discards the other's unsaved changes (no version stamps, no locks)

use std::path::Path;
use std::sync::Arc;

pub use folio_app::{AdminPanel, GalleryView, GalleryWatcher};
pub use folio_core::admin::AdminError;
pub use folio_core::config::SiteConfig;
pub use folio_core::image::{ImageSource, FALLBACK_IMAGE_URL};
pub use folio_core::ports::{SharedStoreHub, SharedStorePort};
pub use folio_core::{CategoryFilter, EntryDraft, EntryId, PortfolioEntry, PortfolioList};
pub use folio_infra::{FileConfigRepository, FileSharedStore, MemorySharedStore};

/// Builder for assembling a site from a store hub and configuration.
pub struct SiteBuilder {
    config: Option<SiteConfig>,
    hub: Option<Arc<dyn SharedStoreHub>>,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            hub: None,
        }
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_store(mut self, hub: Arc<dyn SharedStoreHub>) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn build(self) -> anyhow::Result<Site> {
        Ok(Site {
            hub: self
                .hub
                .ok_or_else(|| anyhow::anyhow!("a shared store hub is required"))?,
            config: self.config.unwrap_or_default(),
        })
    }
}

/// A wired site: the shared store hub plus the configuration both sides
/// use. `admin()` and `gallery()` open fresh store contexts, so every
/// service instance is its own "tab".
pub struct Site {
    hub: Arc<dyn SharedStoreHub>,
    config: SiteConfig,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder::new()
    }

    /// Ephemeral site on the in-memory store, default configuration.
    pub fn in_memory() -> Self {
        Self {
            hub: Arc::new(MemorySharedStore::new()),
            config: SiteConfig::default(),
        }
    }

    /// Durable site backed by the JSON store file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let hub = FileSharedStore::open(path.as_ref()).await?;
        Ok(Self {
            hub: Arc::new(hub),
            config: SiteConfig::default(),
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Open an admin panel in a fresh store context.
    pub fn admin(&self) -> AdminPanel {
        AdminPanel::new(self.hub.context(), &self.config)
    }

    /// Open a gallery view in a fresh store context.
    pub fn gallery(&self) -> GalleryView {
        GalleryView::new(self.hub.context(), &self.config)
    }
}
