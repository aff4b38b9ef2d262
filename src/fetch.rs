use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};

/// Anything that can turn a URL into page text.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP GET with the configured user agent.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        // Client-wide ceiling; the pipeline applies tighter per-request bounds.
        let timeout = config.listing_timeout().max(config.detail_timeout());
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout + Duration::from_secs(1))
            .gzip(true)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }
}
