//! Boundary between the loosely-typed upstream document and the strict
//! [`Article`]/[`Category`] shapes.
//!
//! Every record is validated on its own: a malformed record is reported and
//! skipped, the rest of the batch survives.

use serde::Deserialize;
use serde_json::Value;
use crate::clock::Clock;
use crate::types::{Article, Author, Category, Dataset};
use crate::{Error, Result};

/// Identifier as found upstream: either a string or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => match n.as_f64() {
                // Integral floats print without a fraction: `1.0` becomes `1`.
                Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    if f == 0.0 {
                        "0".to_string()
                    } else {
                        format!("{f:.0}")
                    }
                }
                _ => n.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub id: RawId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_hint: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategory>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A single upstream record after shape validation.
#[derive(Debug, Clone)]
pub enum RawRecord<T> {
    Valid(T),
    Malformed { index: usize, reason: String },
}

impl<T: for<'de> Deserialize<'de>> RawRecord<T> {
    pub fn parse(index: usize, value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(raw) => RawRecord::Valid(raw),
            Err(e) => RawRecord::Malformed { index, reason: e.to_string() },
        }
    }
}

/// The upstream document split into per-record results.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub articles: Vec<RawRecord<RawArticle>>,
    pub categories: Vec<RawRecord<RawCategory>>,
}

impl RawDocument {
    /// Splits `{ articles: [...], categories: [...] }`. Missing arrays are
    /// treated as empty; a non-object document or a non-array field is a
    /// parse error.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut doc) = value else {
            return Err(Error::UpstreamParse("document is not a JSON object".to_string()));
        };
        Ok(Self {
            articles: records(doc.remove("articles"), "articles")?,
            categories: records(doc.remove("categories"), "categories")?,
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }
}

fn records<T: for<'de> Deserialize<'de>>(field: Option<Value>, name: &str) -> Result<Vec<RawRecord<T>>> {
    match field {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .enumerate()
            .map(|(i, item)| RawRecord::parse(i, item))
            .collect()),
        Some(_) => Err(Error::UpstreamParse(format!("`{}` is not an array", name))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

pub fn normalize_category(raw: RawCategory) -> Category {
    Category {
        id: raw.id.into_string(),
        name: raw.name.unwrap_or_default(),
        slug: raw.slug.unwrap_or_default(),
    }
}

pub fn normalize_author(raw: Option<RawAuthor>) -> Author {
    let raw = raw.unwrap_or(RawAuthor { id: None, name: None });
    let fallback = Author::default();
    Author {
        id: non_empty(raw.id.map(RawId::into_string)).unwrap_or(fallback.id),
        name: non_empty(raw.name).unwrap_or(fallback.name),
    }
}

/// Maps one upstream article into an [`Article`]. Fails only when the
/// embedded category is absent.
pub fn normalize_article(raw: RawArticle, clock: &dyn Clock) -> std::result::Result<Article, String> {
    let category = raw
        .category
        .map(normalize_category)
        .ok_or_else(|| "missing category".to_string())?;
    let now = clock.now_iso();

    Ok(Article {
        id: raw.id.into_string(),
        title: raw.title.unwrap_or_default(),
        excerpt: raw.excerpt.unwrap_or_default(),
        content: raw.content.unwrap_or_default(),
        slug: raw.slug.unwrap_or_default(),
        image_url: raw.image_url.unwrap_or_default(),
        image_hint: raw.image_hint,
        video_url: raw.video_url,
        category,
        author: normalize_author(raw.author),
        published_at: raw.published_at.unwrap_or_default(),
        featured: raw.featured.unwrap_or(false),
        created_at: non_empty(raw.created_at).unwrap_or_else(|| now.clone()),
        updated_at: non_empty(raw.updated_at).unwrap_or(now),
    })
}

/// Normalizes a whole document, skipping malformed records with a warning.
pub fn normalize_document(doc: RawDocument, clock: &dyn Clock) -> Dataset {
    let mut dataset = Dataset::default();

    for record in doc.articles {
        match record {
            RawRecord::Valid(raw) => {
                let id = raw.id.clone().into_string();
                match normalize_article(raw, clock) {
                    Ok(article) => dataset.articles.push(article),
                    Err(reason) => tracing::warn!("⚠️ Skipping article {}: {}", id, reason),
                }
            }
            RawRecord::Malformed { index, reason } => {
                tracing::warn!("⚠️ Skipping malformed article at index {}: {}", index, reason);
            }
        }
    }

    for record in doc.categories {
        match record {
            RawRecord::Valid(raw) => dataset.categories.push(normalize_category(raw)),
            RawRecord::Malformed { index, reason } => {
                tracing::warn!("⚠️ Skipping malformed category at index {}: {}", index, reason);
            }
        }
    }

    dataset
}

pub fn normalize_value(value: Value, clock: &dyn Clock) -> Result<Dataset> {
    Ok(normalize_document(RawDocument::from_value(value)?, clock))
}
