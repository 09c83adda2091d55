use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR_ID: &str = "unknown";
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown Author";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            id: UNKNOWN_AUTHOR_ID.to_string(),
            name: UNKNOWN_AUTHOR_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl Category {
    /// CSS class fragment derived from the slug.
    pub fn css_class(&self) -> String {
        category_class(&self.slug)
    }

    pub fn tag_class(&self) -> String {
        format!("category-tag-{}", self.css_class())
    }

    pub fn border_class(&self) -> String {
        format!("category-border-{}", self.css_class())
    }
}

/// Strips hyphens and lowercases a category slug (`"Arts-Culture"` → `"artsculture"`).
pub fn category_class(slug: &str) -> String {
    slug.replace('-', "").to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub slug: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub category: Category,
    pub author: Author,
    /// Display string, never parsed.
    pub published_at: String,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Normalized upstream dataset as held by the server cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub articles: Vec<Article>,
    pub categories: Vec<Category>,
}
