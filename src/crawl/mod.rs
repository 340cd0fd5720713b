// src/crawl/mod.rs
//! Link discovery over the three-level hub hierarchy.

pub mod config;

use std::collections::HashSet;

use scraper::{Html, Selector};
use once_cell::sync::Lazy;

use crate::extractors::document::{CONTAINER_SELECTOR, GROUP_SELECTOR};
use crate::fetch::Fetcher;
use crate::utils::error::CrawlError;

pub use config::CrawlConfig;

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile LINK_SELECTOR")
});

/// Hub levels between the start page and the leaf documents.
const HUB_DEPTH: usize = 3;

/// Absolute URLs in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the URL was already present.
    pub fn insert(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.urls.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = LinkSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

/// Fetches a hub page and returns the links of its group region, resolved
/// against the page's final URL.
pub async fn collect_links(fetcher: &dyn Fetcher, hub_url: &str) -> Result<LinkSet, CrawlError> {
    let page = fetcher.fetch(hub_url).await?;
    let document = Html::parse_document(&page.body);

    let container = document
        .select(&CONTAINER_SELECTOR)
        .next()
        .ok_or_else(|| CrawlError::HierarchyBreak { url: hub_url.to_string(), region: "div.r" })?;
    let group = container
        .select(&GROUP_SELECTOR)
        .next()
        .ok_or_else(|| CrawlError::HierarchyBreak { url: hub_url.to_string(), region: "div.c" })?;

    let mut links = LinkSet::new();
    for anchor in group.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        match page.final_url.join(href.trim()) {
            Ok(resolved) => {
                links.insert(resolved.to_string());
            }
            Err(e) => tracing::debug!("Skipping href '{}' on {}: {}", href, hub_url, e),
        }
    }

    tracing::debug!("Collected {} links from {}", links.len(), page.final_url);
    Ok(links)
}

/// Walks the hub hierarchy from the configured start page down to leaf
/// document URLs, minus the denylist.
pub async fn crawl_leaf_urls(fetcher: &dyn Fetcher, config: &CrawlConfig) -> Result<Vec<String>, CrawlError> {
    let mut level = vec![config.start_url.clone()];

    for depth in 1..=HUB_DEPTH {
        let mut next = Vec::new();
        for hub in &level {
            let links = collect_links(fetcher, hub).await?;
            next.extend(links.into_vec());
        }
        tracing::info!("Crawl level {}: {} hubs yielded {} links", depth, level.len(), next.len());
        level = next;
    }

    let total = level.len();
    let leaves: LinkSet = level
        .into_iter()
        .filter(|url| !config.is_denied(url))
        .collect();
    tracing::info!(
        "{} leaf URLs after removing denylisted and repeated entries ({} before)",
        leaves.len(),
        total
    );
    Ok(leaves.into_vec())
}
