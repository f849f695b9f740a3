//! Shared store implementations.
//!
//! Both stores are *hubs*: `context()` opens a new handle standing for one
//! independent view (the browser-tab analog). Handles share the hub's data
//! and its notification bus; a write through one handle is delivered to
//! every other handle subscribed to that key, never back to the writer.

mod bus;
mod file;
mod memory;

pub use file::FileSharedStore;
pub use memory::MemorySharedStore;
