use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::error::FeedError;

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable name of the source
    fn name(&self) -> &'static str;

    /// Retrieve the raw feed document at `url`
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError>;
}

pub struct HttpFeedSource {
    client: Client,
    timeout: Duration,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, timeout })
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, FeedError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let url = Url::parse(url)?;
        debug!("Fetching feed from: {}", url);

        let body = tokio::time::timeout(self.timeout, self.get(url))
            .await
            .map_err(|_| FeedError::Timeout(self.timeout))??;

        debug!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
