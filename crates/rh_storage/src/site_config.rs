use rh_core::{Clock, Result, Section, SectionName, SectionPatch, SiteConfig};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Process-lifetime site configuration, seeded with the compiled-in documents.
pub struct SiteConfigStore {
    config: RwLock<SiteConfig>,
    clock: Arc<dyn Clock>,
}

impl SiteConfigStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let config = SiteConfig::seeded(clock.as_ref());
        Self::with_config(config, clock)
    }

    pub fn with_config(config: SiteConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: RwLock::new(config),
            clock,
        }
    }

    pub async fn snapshot(&self) -> SiteConfig {
        self.config.read().await.clone()
    }

    pub async fn section(&self, name: SectionName) -> Section {
        self.config.read().await.section(name).clone()
    }

    pub async fn get_section(&self, name: &str) -> Result<Section> {
        let name: SectionName = name.parse()?;
        Ok(self.section(name).await)
    }

    pub async fn update(&self, name: SectionName, patch: &SectionPatch) -> Section {
        let mut config = self.config.write().await;
        let updated = config.section(name).apply(patch, self.clock.now_iso());
        *config.section_mut(name) = updated.clone();
        info!("📝 Updated site config section {}", name);
        updated
    }

    pub async fn update_section(&self, name: &str, patch: &SectionPatch) -> Result<Section> {
        let name: SectionName = name.parse()?;
        Ok(self.update(name, patch).await)
    }
}
