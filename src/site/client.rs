//! HTTP client for storefront requests.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for fetching storefront pages - enables mocking for tests.
#[async_trait]
pub trait SiteSource: Send + Sync {
    /// Fetches a collection listing page and returns its HTML.
    async fn listing(&self, page: u32) -> Result<String>;

    /// Fetches a product page by absolute URL and returns its HTML.
    async fn product(&self, url: &str) -> Result<String>;
}

/// Storefront HTTP client sending a fixed identifying User-Agent.
pub struct SiteClient {
    client: Client,
    listing_url: String,
    user_agent: String,
}

impl SiteClient {
    /// Creates a new client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            listing_url: config.listing_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn listing_page_url(&self, page: u32) -> String {
        let separator = if self.listing_url.contains('?') { '&' } else { '?' };
        format!("{}{}page={}", self.listing_url, separator, page)
    }

    /// Performs a GET request; any non-2xx status is an error.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status: {}", url, status);
        }

        response.text().await.with_context(|| format!("Failed to read response body from {}", url))
    }
}

#[async_trait]
impl SiteSource for SiteClient {
    async fn listing(&self, page: u32) -> Result<String> {
        let url = self.listing_page_url(page);

        info!("Scraping page {}: {}", page, url);
        self.get(&url).await
    }

    async fn product(&self, url: &str) -> Result<String> {
        self.get(url).await
    }
}
