use crate::config::Config;
use crate::error::TagError;
use anyhow::bail;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// One HTTP GET per hit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request; the response body is never read.
    async fn get(&self, url: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, TagError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder.build().map_err(TagError::HttpClient)?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> anyhow::Result<()> {
        let res = self.client.get(url).send().await?;

        if !res.status().is_success() {
            bail!("status = {}", res.status());
        }

        Ok(())
    }
}
