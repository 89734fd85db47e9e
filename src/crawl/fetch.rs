// src/crawl/fetch.rs
// =============================================================================
// Fetching pages.
//
// The crawler only ever sees the PageFetcher trait; the reqwest-backed
// HttpFetcher is what the binary plugs in. The proxy, user agent and timeout
// live on the shared reqwest::Client (see config.rs).
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::FetchError;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// The body of the page at `url`, or why it could not be fetched.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e))?;

        if !response.status().is_success() {
            return Err(FetchError::status(response.status().as_u16()));
        }

        response.text().await.map_err(|e| FetchError::from_reqwest(&e))
    }
}
