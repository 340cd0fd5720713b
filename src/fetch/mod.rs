// src/fetch/mod.rs
pub mod client;

use async_trait::async_trait;
use url::Url;
use crate::utils::error::FetchError;

pub use client::{FetchConfig, HttpFetcher};

/// A fetched page: its body and the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub final_url: Url,
    pub body: String,
}

/// Anything that can turn a URL into raw markup.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
