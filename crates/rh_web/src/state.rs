use rh_core::{ArticleSource, Clock, SystemClock};
use rh_storage::{ArticleCache, SiteConfigStore};
use rh_upstream::{FileSource, HttpSource};
use std::sync::Arc;
use crate::config::{ServerConfig, Upstream};

pub struct AppState {
    pub cache: ArticleCache,
    pub site_config: SiteConfigStore,
    pub ping_message: String,
}

impl AppState {
    pub fn new(cache: ArticleCache, site_config: SiteConfigStore, ping_message: impl Into<String>) -> Self {
        Self {
            cache,
            site_config,
            ping_message: ping_message.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> rh_core::Result<Self> {
        let source: Arc<dyn ArticleSource> = match &config.upstream {
            Upstream::Url(url) => match config.upstream_timeout {
                Some(timeout) => Arc::new(HttpSource::with_timeout(url.clone(), timeout)?),
                None => Arc::new(HttpSource::new(url.clone())),
            },
            Upstream::File(path) => Arc::new(FileSource::new(path.clone())),
        };
        Ok(Self::with_source(source, Arc::new(SystemClock), config))
    }

    pub fn with_source(source: Arc<dyn ArticleSource>, clock: Arc<dyn Clock>, config: &ServerConfig) -> Self {
        tracing::info!("📚 Serving articles from {}", source.name());
        let cache = ArticleCache::with_ttl(source, clock.clone(), config.cache_ttl);
        let site_config = SiteConfigStore::new(clock);
        Self::new(cache, site_config, config.ping_message.clone())
    }
}
