use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entry::{EntryId, PortfolioEntry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),

    #[error("entry {0} not found")]
    NotFound(EntryId),
}

/// Ordered sequence of portfolio entries. Insertion order is display order.
///
/// The list serializes as one JSON array and is always written to the shared
/// store as a complete snapshot, never a diff. Ids are unique at the moment
/// of write; `append` and `replace` enforce that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioList {
    entries: Vec<PortfolioEntry>,
}

impl PortfolioList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortfolioEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&PortfolioEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Allocate a fresh id: the current timestamp in milliseconds, bumped
    /// past the highest existing id when two inserts land in the same
    /// millisecond. Monotonic-ish, guaranteed unique within this list.
    pub fn allocate_id(&self, now_ms: i64) -> EntryId {
        let next = self
            .entries
            .iter()
            .map(|e| e.id.as_i64() + 1)
            .max()
            .unwrap_or(i64::MIN);
        EntryId::new(now_ms.max(next))
    }

    /// Append an entry. The new entry appears last in display order.
    pub fn append(&mut self, entry: PortfolioEntry) -> Result<(), ListError> {
        if self.contains(entry.id) {
            return Err(ListError::DuplicateId(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Replace the entry with the given id in place, preserving its position.
    pub fn replace(&mut self, id: EntryId, entry: PortfolioEntry) -> Result<(), ListError> {
        if entry.id != id && self.contains(entry.id) {
            return Err(ListError::DuplicateId(entry.id));
        }
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ListError::NotFound(id))?;
        *slot = entry;
        Ok(())
    }

    /// Remove the entry with the given id, preserving the order of the rest.
    pub fn remove(&mut self, id: EntryId) -> Result<PortfolioEntry, ListError> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ListError::NotFound(id))?;
        Ok(self.entries.remove(pos))
    }

    /// Serialize the full snapshot for the shared store.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a snapshot read from the shared store.
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

impl FromIterator<PortfolioEntry> for PortfolioList {
    fn from_iter<I: IntoIterator<Item = PortfolioEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PortfolioList {
    type Item = &'a PortfolioEntry;
    type IntoIter = std::slice::Iter<'a, PortfolioEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
