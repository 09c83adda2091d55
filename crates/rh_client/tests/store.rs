use async_trait::async_trait;
use rh_client::{DataStore, HubApi};
use rh_core::{
    Article, Author, Category, Error, Result, SectionName, SectionPatch, SiteConfigUpdate,
    SiteConfigUpdated,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

struct FakeApi {
    body: Result<Value>,
    fetches: AtomicUsize,
    updates: Mutex<Vec<SiteConfigUpdate>>,
}

impl FakeApi {
    fn serving(body: Value) -> Self {
        Self {
            body: Ok(body),
            fetches: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            body: Err(Error::UpstreamFetch("Failed to fetch articles: 500".to_string())),
            fetches: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HubApi for FakeApi {
    async fn fetch_articles(&self) -> Result<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.body.clone()
    }

    async fn update_site_config(&self, update: &SiteConfigUpdate) -> Result<SiteConfigUpdated> {
        self.updates.lock().unwrap().push(update.clone());
        Ok(SiteConfigUpdated {
            message: "Site config updated successfully".to_string(),
            data: rh_core::Section {
                title: update.title.clone().unwrap_or_default(),
                content: "kept".to_string(),
                updated_at: "2024-11-02T00:00:00.000Z".to_string(),
            },
        })
    }

    async fn ping(&self) -> Result<String> {
        Ok("ping".to_string())
    }
}

fn envelope() -> Value {
    json!({
        "articles": [
            {"id": 10, "slug": "first", "title": "First", "featured": true,
             "category": {"id": 1, "name": "Science", "slug": "science"}},
            {"id": "11", "slug": "second", "title": "Second",
             "category": {"id": "2", "name": "Arts", "slug": "arts"}},
            {"id": "12", "slug": "third", "title": "Third",
             "category": {"id": 1, "name": "Science", "slug": "science"}}
        ],
        "categories": [
            {"id": 1, "name": "Science", "slug": "science"},
            {"id": 2, "name": "Arts", "slug": "arts"}
        ],
        "siteConfig": {
            "about": {"title": "About Readme Hub", "content": "About", "updatedAt": "2024-11-01T00:00:00.000Z"},
            "termsOfService": {"title": "Terms of Service", "content": "Terms", "updatedAt": "2024-11-01T00:00:00.000Z"}
        }
    })
}

fn article(id: &str, category_id: &str, featured: bool) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Article {}", id),
        excerpt: "excerpt".to_string(),
        content: String::new(),
        slug: format!("article-{}", id),
        image_url: "https://img.example/1.jpg".to_string(),
        image_hint: None,
        video_url: None,
        category: Category {
            id: category_id.to_string(),
            name: "Category".to_string(),
            slug: format!("category-{}", category_id),
        },
        author: Author::default(),
        published_at: "Nov 1, 2024".to_string(),
        featured,
        created_at: "2024-11-01T00:00:00.000Z".to_string(),
        updated_at: "2024-11-01T00:00:00.000Z".to_string(),
    }
}

async fn loaded() -> DataStore {
    let mut store = DataStore::new();
    store.initialize(&FakeApi::serving(envelope())).await;
    store
}

fn featured_count(store: &DataStore) -> usize {
    store.articles().iter().filter(|a| a.featured).count()
}

#[tokio::test]
async fn test_initialize_normalizes_envelope() {
    let store = loaded().await;
    assert!(store.is_initialized());
    assert_eq!(store.articles().len(), 3);
    assert_eq!(store.articles()[0].id, "10");
    assert_eq!(store.articles()[0].category.id, "1");
    assert_eq!(store.articles()[0].author.name, "Unknown Author");
    assert_eq!(store.categories()[1].id, "2");
    assert_eq!(store.site_config().unwrap().about.content, "About");
}

#[tokio::test]
async fn test_malformed_site_config_keeps_articles() {
    let mut body = envelope();
    body["siteConfig"] = json!({"about": 5});
    let mut store = DataStore::new();
    store.initialize(&FakeApi::serving(body)).await;
    assert!(store.is_initialized());
    assert_eq!(store.articles().len(), 3);
    assert_eq!(store.categories().len(), 2);
    assert!(store.site_config().is_none());
}

#[tokio::test]
async fn test_initialize_fetches_once() {
    let api = FakeApi::serving(envelope());
    let mut store = DataStore::new();
    store.initialize(&api).await;
    store.initialize(&api).await;
    assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_initialize_leaves_empty_store() {
    let api = FakeApi::failing();
    let mut store = DataStore::new();
    store.initialize(&api).await;
    assert!(store.is_initialized());
    assert!(store.articles().is_empty());
    assert!(store.categories().is_empty());
    assert!(store.site_config().is_none());

    store.initialize(&api).await;
    assert_eq!(api.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_article_prepends_and_ignores_duplicates() {
    let mut store = loaded().await;
    store.create_article(article("20", "1", false));
    assert_eq!(store.articles()[0].id, "20");
    assert_eq!(store.articles().len(), 4);

    let mut duplicate = article("20", "1", false);
    duplicate.title = "Changed".to_string();
    store.create_article(duplicate);
    assert_eq!(store.articles().len(), 4);
    assert_eq!(store.article_by_id("20").unwrap().title, "Article 20");
}

#[tokio::test]
async fn test_featured_invariant_holds() {
    let mut store = loaded().await;
    assert_eq!(featured_count(&store), 1);

    store.create_article(article("20", "1", true));
    assert_eq!(featured_count(&store), 1);
    assert!(store.article_by_id("20").unwrap().featured);

    store.update_article(article("11", "2", true));
    assert_eq!(featured_count(&store), 1);
    assert!(store.article_by_id("11").unwrap().featured);

    store.create_article(article("21", "1", false));
    store.update_article(article("12", "1", true));
    store.create_article(article("22", "2", true));
    assert_eq!(featured_count(&store), 1);
    assert_eq!(store.featured_article().unwrap().id, "22");
}

#[tokio::test]
async fn test_update_article_is_idempotent() {
    let mut once = loaded().await;
    let mut twice = loaded().await;
    let mut updated = article("11", "2", true);
    updated.title = "Rewritten".to_string();

    once.update_article(updated.clone());
    twice.update_article(updated.clone());
    twice.update_article(updated);
    assert_eq!(once.articles(), twice.articles());
    assert_eq!(once.article_by_id("11").unwrap().title, "Rewritten");
}

#[tokio::test]
async fn test_update_unknown_article_keeps_collection() {
    let mut store = loaded().await;
    let before: Vec<String> = store.articles().iter().map(|a| a.id.clone()).collect();
    store.update_article(article("404", "1", false));
    let after: Vec<String> = store.articles().iter().map(|a| a.id.clone()).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_remove_article() {
    let mut store = loaded().await;
    store.remove_article("11");
    assert!(store.article_by_id("11").is_none());
    store.remove_article("does-not-exist");
    assert_eq!(store.articles().len(), 2);
}

#[tokio::test]
async fn test_remove_category_cascades() {
    let mut store = loaded().await;
    store.remove_category("1");
    assert!(store.categories().iter().all(|c| c.id != "1"));
    assert_eq!(store.articles().len(), 1);
    assert_eq!(store.articles()[0].id, "11");
}

#[tokio::test]
async fn test_lookups() {
    let store = loaded().await;
    assert_eq!(store.article_by_slug("second").unwrap().id, "11");
    assert_eq!(store.category_by_slug("arts").unwrap().name, "Arts");
    assert_eq!(store.articles_in_category("science").len(), 2);
    assert!(matches!(store.require_article_by_slug("missing"), Err(Error::NotFound(_))));
    assert!(matches!(store.require_category_by_slug("missing"), Err(Error::NotFound(_))));
    assert!(matches!(store.require_article("missing"), Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_front_page_and_stats() {
    let mut store = loaded().await;
    for i in 0..20 {
        store.create_article(article(&format!("n{}", i), "2", false));
    }
    let page = store.front_page();
    assert_eq!(page.hero.unwrap().id, "10");
    assert_eq!(page.lead.len(), 12);
    assert_eq!(page.more.len(), 6);
    assert!(page.lead.iter().chain(page.more.iter()).all(|a| !a.featured));

    let stats = store.stats();
    assert_eq!(stats.total_articles, 23);
    assert_eq!(stats.categories, 2);
    assert_eq!(stats.featured, 1);
    assert_eq!(store.header_categories().len(), 2);
}

#[tokio::test]
async fn test_update_site_config_replaces_local_section() {
    let api = FakeApi::serving(envelope());
    let mut store = DataStore::new();
    store.initialize(&api).await;

    let section = store
        .update_site_config(&api, SectionName::About, SectionPatch::title("New"))
        .await
        .unwrap();
    assert_eq!(section.title, "New");
    assert_eq!(store.site_config().unwrap().about.title, "New");
    assert_eq!(store.site_config().unwrap().terms_of_service.content, "Terms");
    assert_eq!(api.updates.lock().unwrap()[0].section.as_deref(), Some("about"));
}
