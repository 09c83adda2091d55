use async_trait::async_trait;
use crate::normalize::RawDocument;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human readable name of the source, used in logs
    fn name(&self) -> &str;

    /// Fetch the upstream document once, without retrying
    async fn fetch(&self) -> Result<RawDocument>;
}
