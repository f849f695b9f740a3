//! folio-core
//!
//! Domain models and ports for the portfolio shared store:
//! - **portfolio**: entries, the ordered list, drafts, category filtering, seed data
//! - **admin**: the demo admin gate and session state machine
//! - **image**: upload intake (format sniffing, size ceiling, data-URI embedding)
//! - **ports**: abstraction layer (SharedStorePort, ConfigPort)
//! - **config**: site configuration model and defaults
//!
//! This crate performs no I/O. Store implementations live in `folio-infra`,
//! orchestration in `folio-app`.

pub mod admin;
pub mod config;
pub mod image;
pub mod portfolio;
pub mod ports;

pub use admin::AdminError;
pub use portfolio::{CategoryFilter, EntryDraft, EntryId, PortfolioEntry, PortfolioList};
