//! folio-infra
//!
//! Adapters behind the `folio-core` ports:
//! - **store**: shared store hubs (in-memory bus, JSON-file backed) handing
//!   out per-context handles with cross-context change notification
//! - **config**: site configuration persisted as a JSON file

pub mod config;
pub mod store;

pub use config::FileConfigRepository;
pub use store::{FileSharedStore, MemorySharedStore};
