//! Client-side data store.
//!
//! Loaded once from `GET /api/articles`, then mutated locally. Article and
//! category changes never reach the server and are lost when the store is
//! dropped. Every mutation swaps in a whole new collection and bumps a
//! revision that views can watch.

use rh_core::normalize::normalize_value;
use rh_core::{
    Article, Category, Clock, Error, Result, Section, SectionName, SectionPatch, SiteConfig,
    SiteConfigUpdate, SystemClock,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use crate::api::HubApi;

pub struct DataStore {
    articles: Vec<Article>,
    categories: Vec<Category>,
    site_config: Option<SiteConfig>,
    initialized: bool,
    clock: Arc<dyn Clock>,
    revision: watch::Sender<u64>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            articles: Vec::new(),
            categories: Vec::new(),
            site_config: None,
            initialized: false,
            clock,
            revision,
        }
    }

    /// Loads the store from the API. Runs at most once per store: a failed
    /// load still marks the store initialized, with empty collections.
    pub async fn initialize(&mut self, api: &dyn HubApi) {
        if self.initialized {
            return;
        }

        match api.fetch_articles().await.and_then(|body| self.parse(body)) {
            Ok((articles, categories, site_config)) => {
                tracing::info!(
                    "📰 Loaded {} articles and {} categories",
                    articles.len(),
                    categories.len()
                );
                self.articles = articles;
                self.categories = categories;
                if site_config.is_some() {
                    self.site_config = site_config;
                }
            }
            Err(e) => tracing::error!("Error loading articles: {}", e),
        }

        self.initialized = true;
        self.bump();
    }

    fn parse(&self, mut body: Value) -> Result<(Vec<Article>, Vec<Category>, Option<SiteConfig>)> {
        let site_config = match body.as_object_mut().and_then(|o| o.remove("siteConfig")) {
            Some(Value::Null) | None => None,
            Some(value) => match serde_json::from_value(value) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring malformed siteConfig: {}", e);
                    None
                }
            },
        };
        let dataset = normalize_value(body, self.clock.as_ref())?;
        Ok((dataset.articles, dataset.categories, site_config))
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Receives the revision number after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn site_config(&self) -> Option<&SiteConfig> {
        self.site_config.as_ref()
    }

    pub fn article_by_id(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// First article with `slug`; later duplicates are shadowed.
    pub fn article_by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn articles_in_category(&self, slug: &str) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.category.slug == slug).collect()
    }

    pub fn require_article(&self, id: &str) -> Result<&Article> {
        self.article_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("article {}", id)))
    }

    pub fn require_article_by_slug(&self, slug: &str) -> Result<&Article> {
        self.article_by_slug(slug)
            .ok_or_else(|| Error::NotFound(format!("article {}", slug)))
    }

    pub fn require_category_by_slug(&self, slug: &str) -> Result<&Category> {
        self.category_by_slug(slug)
            .ok_or_else(|| Error::NotFound(format!("category {}", slug)))
    }

    /// Prepends `article` unless its id is taken. A featured article
    /// unfeatures every other article, even when the insert is skipped.
    pub fn create_article(&mut self, article: Article) {
        let mut next = self.articles.clone();
        if article.featured {
            for existing in next.iter_mut() {
                existing.featured = false;
            }
        }
        if !next.iter().any(|a| a.id == article.id) {
            next.insert(0, article);
        }
        self.articles = next;
        self.bump();
    }

    /// Replaces the article with the same id; does nothing to the
    /// collection membership when there is no match.
    pub fn update_article(&mut self, article: Article) {
        let next = self
            .articles
            .iter()
            .map(|existing| {
                if existing.id == article.id {
                    article.clone()
                } else if article.featured {
                    Article { featured: false, ..existing.clone() }
                } else {
                    existing.clone()
                }
            })
            .collect();
        self.articles = next;
        self.bump();
    }

    pub fn remove_article(&mut self, id: &str) {
        self.articles = self.articles.iter().filter(|a| a.id != id).cloned().collect();
        self.bump();
    }

    pub fn add_category(&mut self, category: Category) {
        if self.categories.iter().any(|c| c.id == category.id) {
            return;
        }
        let mut next = self.categories.clone();
        next.push(category);
        self.categories = next;
        self.bump();
    }

    /// Removes the category and every article filed under it.
    pub fn remove_category(&mut self, id: &str) {
        self.categories = self.categories.iter().filter(|c| c.id != id).cloned().collect();
        self.articles = self
            .articles
            .iter()
            .filter(|a| a.category.id != id)
            .cloned()
            .collect();
        self.bump();
    }

    /// Sends a section update to the server and keeps the returned section.
    pub async fn update_site_config(
        &mut self,
        api: &dyn HubApi,
        section: SectionName,
        patch: SectionPatch,
    ) -> Result<Section> {
        let updated = api
            .update_site_config(&SiteConfigUpdate::new(section, patch))
            .await?;
        if let Some(config) = self.site_config.as_mut() {
            *config.section_mut(section) = updated.data.clone();
            self.bump();
        }
        Ok(updated.data)
    }
}
