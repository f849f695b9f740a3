use crate::image::DEFAULT_MAX_UPLOAD_BYTES;

use super::model::{
    AdminConfig, ImageConfig, SiteConfig, StoreConfig, CURRENT_SCHEMA_VERSION,
};

/// The key the public site has always used; changing it orphans persisted
/// portfolios.
pub const DEFAULT_PORTFOLIO_KEY: &str = "portfolioItems";

/// Demo gate default. Deployments are expected to override it, and real
/// ones to replace the gate with a server-side check.
pub const DEFAULT_ADMIN_SECRET: &str = "admin123";

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            admin: AdminConfig::default(),
            store: StoreConfig::default(),
            images: ImageConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_ADMIN_SECRET.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            portfolio_key: DEFAULT_PORTFOLIO_KEY.to_string(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
