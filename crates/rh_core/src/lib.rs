pub mod clock;
pub mod error;
pub mod normalize;
pub mod site_config;
pub mod source;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use site_config::{
    ArticlesEnvelope, Section, SectionName, SectionPatch, SiteConfig, SiteConfigUpdate,
    SiteConfigUpdated,
};
pub use source::ArticleSource;
pub use types::{category_class, Article, Author, Category, Dataset};

pub mod prelude {
    pub use crate::{Article, Category, Dataset, Error, Result, SectionName, SiteConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_class() {
        assert_eq!(category_class("Arts-And-Culture"), "artsandculture");
        let category = Category {
            id: "1".to_string(),
            name: "Science".to_string(),
            slug: "sci-tech".to_string(),
        };
        assert_eq!(category.tag_class(), "category-tag-scitech");
        assert_eq!(category.border_class(), "category-border-scitech");
    }
}
