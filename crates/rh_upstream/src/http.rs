use async_trait::async_trait;
use reqwest::Client;
use rh_core::normalize::RawDocument;
use rh_core::{ArticleSource, Error, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://raw.githubusercontent.com/ismdfaru-coder/newrepo2/main/data/db.json";

/// Fetches the dataset document over HTTP(S).
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Same as [`HttpSource::new`] but bounds every request by `timeout`.
    pub fn with_timeout(url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url.as_str())
            .finish()
    }
}

#[async_trait]
impl ArticleSource for HttpSource {
    fn name(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch(&self) -> Result<RawDocument> {
        tracing::debug!("🌐 Fetching {}", self.url);
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamFetch(format!(
                "Failed to fetch db.json: {}",
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;
        RawDocument::from_slice(&body)
    }
}
