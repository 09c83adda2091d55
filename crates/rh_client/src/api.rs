use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rh_core::{Error, Result, SiteConfigUpdate, SiteConfigUpdated};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use url::Url;

/// The slice of the HTTP API the client store talks to.
#[async_trait]
pub trait HubApi: Send + Sync {
    /// `GET /api/articles`, returned untyped so the store can normalize it.
    async fn fetch_articles(&self) -> Result<Value>;

    /// `POST /api/site-config`
    async fn update_site_config(&self, update: &SiteConfigUpdate) -> Result<SiteConfigUpdated>;

    /// `GET /api/ping`
    async fn ping(&self) -> Result<String>;
}

pub struct HttpHubApi {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct PingBody {
    message: String,
}

impl HttpHubApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid API URL: {}", e)))
    }
}

impl fmt::Debug for HttpHubApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpHubApi")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::UpstreamFetch(e.to_string()))?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl HubApi for HttpHubApi {
    async fn fetch_articles(&self) -> Result<Value> {
        let response = self
            .client
            .get(self.endpoint("/api/articles")?)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!(
                "Failed to fetch articles: {}",
                response.status().as_u16()
            )));
        }
        read_json(response).await
    }

    async fn update_site_config(&self, update: &SiteConfigUpdate) -> Result<SiteConfigUpdated> {
        let response = self
            .client
            .post(self.endpoint("/api/site-config")?)
            .json(update)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;
        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(Error::InvalidSection(
                update.section.clone().unwrap_or_default(),
            )),
            status => Err(Error::UpstreamFetch(format!(
                "Failed to update site config: {}",
                status.as_u16()
            ))),
        }
    }

    async fn ping(&self) -> Result<String> {
        let response = self
            .client
            .get(self.endpoint("/api/ping")?)
            .send()
            .await
            .map_err(|e| Error::UpstreamFetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!("Ping failed: {}", response.status().as_u16())));
        }
        let body: PingBody = read_json(response).await?;
        Ok(body.message)
    }
}
