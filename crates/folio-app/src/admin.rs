use std::sync::Arc;

use chrono::Utc;
use folio_core::admin::{AdminError, AdminGate, AdminState};
use folio_core::config::SiteConfig;
use folio_core::image::resolve_image;
use folio_core::portfolio::seed::seed_entries;
use folio_core::ports::SharedStorePort;
use folio_core::{EntryDraft, EntryId, PortfolioEntry, PortfolioList};
use tracing::{info, warn};

/// The admin side of the portfolio: the single logical writer.
///
/// Holds the session state and the in-memory working list. Every successful
/// mutation persists the full list to the shared store as one snapshot
/// write; there is no batching and no delta. Failures of any kind leave
/// both the working list and the store untouched.
///
/// Two admin sessions open at once are a real race: the last one to write
/// wins and silently discards the other's unsaved changes. Accepted
/// limitation; there is no optimistic concurrency control here.
pub struct AdminPanel {
    store: Arc<dyn SharedStorePort>,
    gate: AdminGate,
    portfolio_key: String,
    max_upload_bytes: u64,
    state: AdminState,
    entries: PortfolioList,
}

impl AdminPanel {
    pub fn new(store: Arc<dyn SharedStorePort>, config: &SiteConfig) -> Self {
        Self {
            store,
            gate: AdminGate::new(config.admin.secret.clone()),
            portfolio_key: config.store.portfolio_key.clone(),
            max_upload_bytes: config.images.max_upload_bytes,
            state: AdminState::default(),
            entries: PortfolioList::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// The current working list. Empty while logged out.
    pub fn entries(&self) -> &PortfolioList {
        &self.entries
    }

    /// Check the candidate against the configured secret. Success opens the
    /// session and loads the working list from the store, seeding the
    /// built-in sample entries when the store has never been written.
    /// Failure changes nothing.
    #[tracing::instrument(name = "admin.login", skip_all)]
    pub async fn login(&mut self, candidate: &str) -> Result<(), AdminError> {
        if !self.gate.verify(candidate) {
            warn!("admin login rejected");
            return Err(AdminError::InvalidPassword);
        }
        let Some(next) = self.state.login() else {
            // Already authenticated; a repeated correct login is a no-op.
            return Ok(());
        };

        let entries = match self.store.read(&self.portfolio_key).await {
            Ok(Some(raw)) => match PortfolioList::decode(&raw) {
                Ok(list) => list,
                Err(err) => {
                    // Corrupt snapshot: treat like a never-written store so
                    // the session still opens. The next mutation overwrites
                    // the corrupt value.
                    warn!(%err, "stored portfolio snapshot is corrupt, starting from seed data");
                    seed_entries()
                }
            },
            Ok(None) => seed_entries(),
            Err(err) => return Err(AdminError::Store(err)),
        };

        self.state = next;
        self.entries = entries;
        info!(entries = self.entries.len(), "admin session opened");
        Ok(())
    }

    /// End the session and clear the in-memory working list. Persisted data
    /// outlives the session; the store is not touched.
    #[tracing::instrument(name = "admin.logout", skip_all)]
    pub fn logout(&mut self) {
        self.state = self.state.logout();
        self.entries.clear();
        info!("admin session closed");
    }

    /// Validate the draft, resolve its image, append a new entry with a
    /// fresh id, and persist the full list. The created entry is returned
    /// and appears last in display order.
    #[tracing::instrument(name = "admin.add_entry", skip_all)]
    pub async fn add_entry(&mut self, draft: EntryDraft) -> Result<PortfolioEntry, AdminError> {
        self.ensure_authenticated()?;
        draft.validate()?;
        let image_url = resolve_image(&draft.image, self.max_upload_bytes)?;

        let id = self.entries.allocate_id(Utc::now().timestamp_millis());
        let entry = PortfolioEntry {
            id,
            title: draft.title.trim().to_string(),
            category: draft.category.trim().to_string(),
            image_url,
            description: draft.description(),
            link: draft.link(),
        };

        let mut candidate = self.entries.clone();
        candidate.append(entry.clone())?;
        self.persist(&candidate).await?;
        self.entries = candidate;

        info!(id = %entry.id, title = %entry.title, "portfolio entry added");
        Ok(entry)
    }

    /// Replace the entry with the given id in place, keeping its position,
    /// and persist the full list.
    #[tracing::instrument(name = "admin.update_entry", skip_all, fields(id = %id))]
    pub async fn update_entry(
        &mut self,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<PortfolioEntry, AdminError> {
        self.ensure_authenticated()?;
        if !self.entries.contains(id) {
            return Err(AdminError::NotFound(id));
        }
        draft.validate()?;
        let image_url = resolve_image(&draft.image, self.max_upload_bytes)?;

        let entry = PortfolioEntry {
            id,
            title: draft.title.trim().to_string(),
            category: draft.category.trim().to_string(),
            image_url,
            description: draft.description(),
            link: draft.link(),
        };

        let mut candidate = self.entries.clone();
        candidate.replace(id, entry.clone())?;
        self.persist(&candidate).await?;
        self.entries = candidate;

        info!(id = %entry.id, "portfolio entry updated");
        Ok(entry)
    }

    /// Remove the entry with the given id and persist the resulting list —
    /// including the empty list: deleting the last entry stores `[]`, it
    /// never deletes the key itself.
    #[tracing::instrument(name = "admin.delete_entry", skip_all, fields(id = %id))]
    pub async fn delete_entry(&mut self, id: EntryId) -> Result<(), AdminError> {
        self.ensure_authenticated()?;

        let mut candidate = self.entries.clone();
        candidate.remove(id)?;
        self.persist(&candidate).await?;
        self.entries = candidate;

        info!(id = %id, remaining = self.entries.len(), "portfolio entry deleted");
        Ok(())
    }

    fn ensure_authenticated(&self) -> Result<(), AdminError> {
        if self.state.is_authenticated() {
            Ok(())
        } else {
            Err(AdminError::NotAuthenticated)
        }
    }

    /// One full-snapshot write. The working list is only committed by the
    /// caller after this succeeds.
    async fn persist(&self, list: &PortfolioList) -> Result<(), AdminError> {
        let raw = list
            .encode()
            .map_err(|err| AdminError::Store(err.into()))?;
        self.store
            .write(&self.portfolio_key, &raw)
            .await
            .map_err(AdminError::Store)
    }
}
