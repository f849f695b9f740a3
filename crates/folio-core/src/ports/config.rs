use async_trait::async_trait;

use crate::config::SiteConfig;

#[async_trait]
pub trait ConfigPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<SiteConfig>;
    async fn save(&self, config: &SiteConfig) -> anyhow::Result<()>;
}
