//! folio-app
//!
//! Application services over the `folio-core` ports:
//! - **admin**: the single logical writer. Password-gated session that
//!   mutates the working list and persists a full snapshot per mutation.
//! - **gallery**: pure observers. Any number of read views that load the
//!   snapshot, subscribe to external changes, and filter by category.

pub mod admin;
pub mod gallery;

pub use admin::AdminPanel;
pub use gallery::{GalleryView, GalleryWatcher};
