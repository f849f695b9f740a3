use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one portfolio entry.
///
/// Allocated from the creation timestamp in milliseconds and bumped past the
/// highest existing id on collision. Uniqueness within a list is the
/// invariant; ordering of ids carries no meaning.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// One showcased work item.
///
/// Field names serialize in camelCase so the stored JSON matches the layout
/// the gallery frontend already reads (`imageUrl`, optional `description`
/// and `link` omitted when absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub id: EntryId,
    pub title: String,
    pub category: String,
    /// Remote URL or an embedded `data:` URI produced by upload intake.
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
