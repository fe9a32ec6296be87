//! HTTP fetcher implementation
//!
//! This module handles the network side of the crawl:
//! - Building the HTTP client from the `[http]` configuration
//! - GET requests that capture status, headers and body
//! - Optional retries for transport failures
//! - Error classification

use crate::cache::WireResponse;
use crate::config::HttpConfig;
use crate::{CatechismError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of raw page responses
///
/// The page cache sits in front of a `Fetcher`. [`HttpFetcher`] is the
/// production implementation; tests plug in in-memory fetchers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Performs a GET for `url` and returns the complete response
    async fn fetch(&self, url: &Url) -> Result<WireResponse>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use catechism::config::HttpConfig;
/// use catechism::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with `reqwest`
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher from the `[http]` configuration
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = build_http_client(config)?;

        Ok(Self::with_client(
            client,
            config.max_retries,
            Duration::from_millis(config.retry_delay_ms),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            client,
            max_retries,
            retry_delay,
        }
    }

    /// Sends a single GET request
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Transport error (DNS, connect, timeout, body) | `Fetch` |
    /// | Any HTTP status, error pages included | `Ok(WireResponse)` |
    async fn fetch_once(&self, url: &Url) -> Result<WireResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CatechismError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} answered HTTP {}", url, status.as_u16());
        }

        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| CatechismError::Fetch {
                url: url.to_string(),
                source,
            })?;

        Ok(WireResponse {
            version,
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<WireResponse> {
        let mut attempt = 0;

        loop {
            match self.fetch_once(url).await {
                Err(e @ CatechismError::Fetch { .. }) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Fetch attempt {} of {} failed: {}",
                        attempt,
                        self.max_retries + 1,
                        e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                result => return result,
            }
        }
    }
}
