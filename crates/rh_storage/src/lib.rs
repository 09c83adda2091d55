pub mod cache;
pub mod site_config;

pub use cache::{ArticleCache, DEFAULT_TTL};
pub use site_config::SiteConfigStore;

pub mod prelude {
    pub use super::{ArticleCache, SiteConfigStore};
    pub use rh_core::{Dataset, Error, Result, SectionName, SiteConfig};
}
