//! HTTP fetcher implementation
//!
//! This module handles every request the archiver makes:
//! - Building the HTTP client with the browser-like user agent
//! - GET requests for post pages (decoded text)
//! - GET requests for images (raw bytes)
//! - Optional retries for transient failures
//!
//! Any non-2xx response is an error. Nothing is retried unless
//! `max-retries` is configured above zero.

use crate::config::Config;
use crate::FetchError;
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The archiver configuration (user agent and timeout are used)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use diary_walker::config::Config;
/// use diary_walker::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(config.crawler.timeout())
        .connect_timeout(Duration::from_secs(10).min(config.crawler.timeout()))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves pages and images, failing on transport errors and non-2xx statuses
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Creates a fail-fast fetcher around an existing client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    /// Builds the client and retry policy from configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::new(client)
            .with_retries(config.crawler.max_retries, config.crawler.retry_delay()))
    }

    /// Enables retries for transient failures (transport errors, 429, 5xx)
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Fetches a page and returns its decoded body
    pub async fn fetch_page(&self, url: &Url) -> Result<String, FetchError> {
        self.retrying(url, || self.fetch_text_once(url)).await
    }

    /// Fetches raw bytes, used for images
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.retrying(url, || self.fetch_bytes_once(url)).await
    }

    async fn fetch_text_once(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.send(url).await?;
        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_bytes_once(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.send(url).await?;
        let bytes = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &Url) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn retrying<T, F, Fut>(&self, url: &Url, mut attempt: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut retries = 0;
        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && retries < self.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        "Retrying {} ({}/{}) after error: {}",
                        url,
                        retries,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
