//! Site configuration domain model.

use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub schema_version: u32,

    pub admin: AdminConfig,

    pub store: StoreConfig,

    pub images: ImageConfig,
}

/// Admin gate configuration.
///
/// The secret is client-visible by design; see `AdminGate` for why this is
/// a demo gate and not a security boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The single shared-store key holding the serialized portfolio list.
    pub portfolio_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Upload size ceiling in bytes. Oversized files are rejected, never
    /// truncated.
    pub max_upload_bytes: u64,
}
