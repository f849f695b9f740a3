pub mod defaults;
pub mod model;

pub use model::{AdminConfig, ImageConfig, SiteConfig, StoreConfig, CURRENT_SCHEMA_VERSION};
