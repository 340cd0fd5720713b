// src/fetch/client.rs
use std::time::Duration;
use async_trait::async_trait;
use reqwest::header;
use url::Url;
use crate::fetch::{FetchedPage, Fetcher};
use crate::utils::error::FetchError;

const DEFAULT_USER_AGENT: &str = concat!("institution_extractor/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// reqwest-backed fetcher. Redirects are followed; the final URL is reported.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        tracing::debug!("Using User-Agent: {}", config.user_agent);
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Downloading document from: {}", url);
        let response = self.client.get(parsed)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?; // Propagates reqwest::Error as FetchError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http { url: url.to_string(), status });
        }

        let final_url = response.url().clone();
        if final_url.as_str() != url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), final_url);

        Ok(FetchedPage { final_url, body })
    }
}
