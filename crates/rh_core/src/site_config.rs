use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::clock::Clock;
use crate::{Article, Category, Error};

/// One of the two named site-configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    #[serde(rename = "about")]
    About,
    #[serde(rename = "termsOfService")]
    TermsOfService,
}

impl SectionName {
    pub const ALL: [SectionName; 2] = [SectionName::About, SectionName::TermsOfService];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::About => "about",
            SectionName::TermsOfService => "termsOfService",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "about" => Ok(SectionName::About),
            "termsOfService" => Ok(SectionName::TermsOfService),
            other => Err(Error::InvalidSection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub content: String,
    pub updated_at: String,
}

impl Section {
    /// Merges the non-empty fields of `patch` and stamps `updated_at`.
    pub fn apply(&self, patch: &SectionPatch, updated_at: String) -> Section {
        let pick = |new: &Option<String>, old: &String| match new {
            Some(value) if !value.is_empty() => value.clone(),
            _ => old.clone(),
        };
        Section {
            title: pick(&patch.title, &self.title),
            content: pick(&patch.content, &self.content),
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl SectionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: None }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self { title: None, content: Some(content.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub about: Section,
    pub terms_of_service: Section,
}

impl SiteConfig {
    /// The compiled-in documents a fresh process starts with.
    pub fn seeded(clock: &dyn Clock) -> Self {
        let now = clock.now_iso();
        Self {
            about: Section {
                title: "About Readme Hub".to_string(),
                content: ABOUT_CONTENT.to_string(),
                updated_at: now.clone(),
            },
            terms_of_service: Section {
                title: "Terms of Service".to_string(),
                content: TERMS_CONTENT.to_string(),
                updated_at: now,
            },
        }
    }

    pub fn section(&self, name: SectionName) -> &Section {
        match name {
            SectionName::About => &self.about,
            SectionName::TermsOfService => &self.terms_of_service,
        }
    }

    pub fn section_mut(&mut self, name: SectionName) -> &mut Section {
        match name {
            SectionName::About => &mut self.about,
            SectionName::TermsOfService => &mut self.terms_of_service,
        }
    }
}

/// Body of `GET /api/articles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesEnvelope {
    pub articles: Vec<Article>,
    pub categories: Vec<Category>,
    pub site_config: SiteConfig,
}

/// Body of `POST /api/site-config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfigUpdate {
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl SiteConfigUpdate {
    pub fn new(section: SectionName, patch: SectionPatch) -> Self {
        Self {
            section: Some(section.as_str().to_string()),
            title: patch.title,
            content: patch.content,
        }
    }

    /// Reads an update out of an arbitrary JSON body. Fields that are absent
    /// or not strings are treated as missing, so a bad `section` surfaces as
    /// `InvalidSection` instead of a decode error.
    pub fn from_value(body: &serde_json::Value) -> Self {
        let field = |name: &str| body.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            section: field("section"),
            title: field("title"),
            content: field("content"),
        }
    }

    pub fn section_name(&self) -> crate::Result<SectionName> {
        self.section
            .as_deref()
            .ok_or_else(|| Error::InvalidSection(String::new()))?
            .parse()
    }

    pub fn patch(&self) -> SectionPatch {
        SectionPatch {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

/// Successful response of `POST /api/site-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfigUpdated {
    pub message: String,
    pub data: Section,
}

const ABOUT_CONTENT: &str = "Readme Hub is a thoughtfully curated collection of stories, essays, and ideas about culture, technology, and human experience.

We believe in the power of narrative to illuminate complex ideas and connect people across the world. Our editorial team carefully selects and commissions work that challenges, inspires, and entertains.

Founded in 2024, Readme Hub is committed to publishing deep, meaningful journalism that explores the intersection of ideas, science, and society.";

const TERMS_CONTENT: &str = "Last Updated: November 2024

1. ACCEPTANCE OF TERMS
By accessing and using Readme Hub, you accept and agree to be bound by the terms and provision of this agreement.

2. USE LICENSE
Permission is granted to temporarily download one copy of the materials (information or software) on Readme Hub for personal, non-commercial transitory viewing only. This is the grant of a license, not a transfer of title, and under this license you may not:
- Modifying or copying the materials
- Using the materials for any commercial purpose or for any public display
- Attempting to decompile or reverse engineer any software contained on Readme Hub
- Removing any copyright or other proprietary notations from the materials
- Transferring the materials to another person or \"mirroring\" the materials on any other server

3. DISCLAIMER
The materials on Readme Hub are provided \"as is\". Readme Hub makes no warranties, expressed or implied, and hereby disclaims and negates all other warranties including, without limitation, implied warranties or conditions of merchantability, fitness for a particular purpose, or non-infringement of intellectual property or other violation of rights.

4. LIMITATIONS
In no event shall Readme Hub or its suppliers be liable for any damages (including, without limitation, damages for loss of data or profit, or due to business interruption) arising out of the use or inability to use the materials on Readme Hub.

5. ACCURACY OF MATERIALS
The materials appearing on Readme Hub could include technical, typographical, or photographic errors. Readme Hub does not warrant that any of the materials on its website are accurate, complete, or current.

6. MODIFICATIONS
Readme Hub may revise these terms of service for its website at any time without notice. By using this website, you are agreeing to be bound by the then current version of these terms of service.

7. GOVERNING LAW
These terms and conditions are governed by and construed in accordance with the laws of the jurisdiction in which Readme Hub is located, and you irrevocably submit to the exclusive jurisdiction of the courts in that location.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_section_name_parsing() {
        assert_eq!("about".parse::<SectionName>().unwrap(), SectionName::About);
        assert_eq!(
            "termsOfService".parse::<SectionName>().unwrap(),
            SectionName::TermsOfService
        );
        assert_eq!(
            "bogus".parse::<SectionName>(),
            Err(Error::InvalidSection("bogus".to_string()))
        );
    }

    #[test]
    fn test_apply_keeps_empty_fields() {
        let config = SiteConfig::seeded(&clock());
        let patch = SectionPatch {
            title: Some("T".to_string()),
            content: Some(String::new()),
        };
        let updated = config.about.apply(&patch, "later".to_string());
        assert_eq!(updated.title, "T");
        assert_eq!(updated.content, config.about.content);
        assert_eq!(updated.updated_at, "later");
    }

    #[test]
    fn test_site_config_wire_shape() {
        let config = SiteConfig::seeded(&clock());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["about"]["title"], "About Readme Hub");
        assert_eq!(json["termsOfService"]["title"], "Terms of Service");
        assert_eq!(json["about"]["updatedAt"], "2024-11-01T00:00:00.000Z");
    }

    #[test]
    fn test_update_without_section_is_invalid() {
        let update: SiteConfigUpdate = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(matches!(update.section_name(), Err(Error::InvalidSection(_))));
    }

    #[test]
    fn test_update_from_loose_body() {
        let update = SiteConfigUpdate::from_value(&serde_json::json!({"section": 5, "title": "T"}));
        assert_eq!(update.section, None);
        assert_eq!(update.title.as_deref(), Some("T"));
        assert!(matches!(update.section_name(), Err(Error::InvalidSection(_))));

        let update = SiteConfigUpdate::from_value(&serde_json::Value::Null);
        assert_eq!(update, SiteConfigUpdate::default());

        let update = SiteConfigUpdate::from_value(&serde_json::json!({"section": "about", "content": ["x"]}));
        assert_eq!(update.section_name(), Ok(SectionName::About));
        assert_eq!(update.content, None);
    }
}
