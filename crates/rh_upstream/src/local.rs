use async_trait::async_trait;
use rh_core::normalize::RawDocument;
use rh_core::{ArticleSource, Error, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves a fixed document from memory and counts how often it was asked.
#[derive(Debug)]
pub struct StaticSource {
    document: Value,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(document: Value) -> Self {
        Self {
            document,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<RawDocument> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        RawDocument::from_value(self.document.clone())
    }
}

/// Reads the document from a local JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl ArticleSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<RawDocument> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| Error::UpstreamFetch(format!("{}: {}", self.name, e)))?;
        RawDocument::from_slice(&bytes)
    }
}
