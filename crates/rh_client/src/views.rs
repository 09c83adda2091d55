use rh_core::{Article, Category};
use crate::store::DataStore;

pub const LEAD_STORIES: usize = 12;
pub const MORE_STORIES: usize = 6;
pub const HEADER_CATEGORIES: usize = 5;

/// Home page partition of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontPage<'a> {
    pub hero: Option<&'a Article>,
    pub lead: Vec<&'a Article>,
    pub more: Vec<&'a Article>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_articles: usize,
    pub categories: usize,
    pub featured: usize,
}

impl DataStore {
    pub fn featured_article(&self) -> Option<&Article> {
        self.articles().iter().find(|a| a.featured)
    }

    pub fn regular_articles(&self) -> Vec<&Article> {
        self.articles().iter().filter(|a| !a.featured).collect()
    }

    pub fn front_page(&self) -> FrontPage<'_> {
        let regular = self.regular_articles();
        let lead_end = regular.len().min(LEAD_STORIES);
        let more_end = regular.len().min(LEAD_STORIES + MORE_STORIES);
        FrontPage {
            hero: self.featured_article(),
            lead: regular[..lead_end].to_vec(),
            more: regular[lead_end..more_end].to_vec(),
        }
    }

    pub fn header_categories(&self) -> &[Category] {
        let end = self.categories().len().min(HEADER_CATEGORIES);
        &self.categories()[..end]
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_articles: self.articles().len(),
            categories: self.categories().len(),
            featured: self.articles().iter().filter(|a| a.featured).count(),
        }
    }
}
