//! Crawler module for fetching and walking the catechism pages
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with optional retries
//! - HTML parsing for numbered paragraphs and the "Next" link
//! - The sequential pagination walk

mod fetcher;
mod parser;
mod walker;

pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use parser::{
    extract_paragraphs, find_next_link, leading_number, parse_page, ParsedPage, NEXT_LABEL,
};
pub use walker::{CrawlReport, PaginationWalker};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::url::UrlResolver;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for building the index. It will:
/// 1. Build the URL resolver and resolve the first page
/// 2. Build the HTTP client
/// 3. Open the page cache
/// 4. Walk the "Next" chain, extracting paragraphs
///
/// Pages already in the cache directory are never fetched again.
pub async fn crawl(config: &Config) -> Result<CrawlReport> {
    let resolver = UrlResolver::from_config(&config.source)?;
    let first_page = resolver.first_page(&config.source)?;

    let fetcher = HttpFetcher::new(&config.http)?;
    let store = CacheStore::new(&config.cache.directory, fetcher);
    tracing::debug!("Using cache directory {}", store.directory().display());

    PaginationWalker::new(&store, &resolver, first_page)
        .walk()
        .await
}
