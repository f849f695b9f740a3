//! Portfolio domain: entries, the ordered list and its snapshot codec,
//! drafts with required-field validation, category filtering, seed data.

pub mod category;
pub mod draft;
pub mod entry;
pub mod list;
pub mod seed;

pub use category::CategoryFilter;
pub use draft::{EntryDraft, Field, ValidationError};
pub use entry::{EntryId, PortfolioEntry};
pub use list::{ListError, PortfolioList};
