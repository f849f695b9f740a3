use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use folio_core::config::{SiteConfig, CURRENT_SCHEMA_VERSION};
use folio_core::ports::ConfigPort;
use tokio::fs;
use tracing::info;

/// Site configuration stored as one JSON file.
///
/// A missing file yields the defaults, so a fresh checkout runs without any
/// setup. Saving writes through a temp file + rename like the shared store.
pub struct FileConfigRepository {
    path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create config dir failed: {}", dir.display()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ConfigPort for FileConfigRepository {
    async fn load(&self) -> Result<SiteConfig> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no config file, using defaults");
                return Ok(SiteConfig::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("read config failed: {}", self.path.display()))
            }
        };

        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parse config failed: {}", self.path.display()))?;

        if config.schema_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "config schema version {} is newer than supported version {}",
                config.schema_version,
                CURRENT_SCHEMA_VERSION
            );
        }
        Ok(config)
    }

    async fn save(&self, config: &SiteConfig) -> Result<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(config).context("serialize config")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &content)
            .await
            .with_context(|| format!("write temp config failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp config to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let repo = FileConfigRepository::new(dir.path().join("config.json"));
        let config = repo.load().await.unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let repo = FileConfigRepository::new(dir.path().join("config.json"));

        let mut config = SiteConfig::default();
        config.admin.secret = "s3cret".into();
        config.images.max_upload_bytes = 1024;

        repo.save(&config).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn newer_schema_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SiteConfig::default();
        config.schema_version = CURRENT_SCHEMA_VERSION + 1;
        fs::write(&path, serde_json::to_string(&config).unwrap())
            .await
            .unwrap();

        let repo = FileConfigRepository::new(&path);
        assert!(repo.load().await.is_err());
    }

    #[tokio::test]
    async fn corrupt_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").await.unwrap();

        let repo = FileConfigRepository::new(&path);
        assert!(repo.load().await.is_err());
    }
}
