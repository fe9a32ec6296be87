//! Pagination walk
//!
//! Follows the "Next" chain from the first page, one page at a time, feeding
//! every numbered paragraph into a [`CatechismIndex`].

use crate::cache::{cache_key, CacheStore, WireResponse};
use crate::catechism::CatechismIndex;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_page;
use crate::output::CrawlStats;
use crate::state::WalkState;
use crate::url::UrlResolver;
use crate::Result;
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

/// Result of a completed walk
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub index: CatechismIndex,
    pub stats: CrawlStats,
}

/// Walks the pagination chain through a [`CacheStore`]
pub struct PaginationWalker<'a, F> {
    store: &'a CacheStore<F>,
    resolver: &'a UrlResolver,
    first_page: Url,
}

impl<'a, F: Fetcher> PaginationWalker<'a, F> {
    pub fn new(store: &'a CacheStore<F>, resolver: &'a UrlResolver, first_page: Url) -> Self {
        Self {
            store,
            resolver,
            first_page,
        }
    }

    /// Walks the chain until a page has no "Next" link
    ///
    /// # Walk Loop
    ///
    /// 1. Load the page through the cache (disk first, network on a miss)
    /// 2. Extract numbered paragraphs; the first occurrence of a number wins
    /// 3. Resolve the "Next" link and continue, or stop if there is none
    ///
    /// A "Next" link back to a page already walked also ends the walk.
    ///
    /// Error pages are walked like any other page; having no "Next" link,
    /// they end the chain.
    ///
    /// # Errors
    ///
    /// Any transport, cache or parse failure aborts the walk; nothing is retried here.
    pub async fn walk(&self) -> Result<CrawlReport> {
        let start_time = Instant::now();
        let hits_before = self.store.cache_hits();
        let fetches_before = self.store.network_fetches();

        let mut index = CatechismIndex::new();
        let mut stats = CrawlStats::default();
        let mut visited = HashSet::new();
        visited.insert(self.first_page.clone());

        tracing::info!("Starting walk at {}", self.first_page);
        let mut state = WalkState::Fetching(self.first_page.clone());

        while let WalkState::Fetching(url) = &state {
            let url = url.clone();

            let bytes = self.store.fetch_cached(&url).await?;
            let response = WireResponse::from_bytes(&cache_key(&url), &bytes)?;
            let page = parse_page(&response.body_text());
            stats.pages_visited += 1;

            state = state.transition(WalkState::Extracting)?;
            let mut inserted = 0;
            for (number, text) in page.paragraphs {
                if index.insert(number, text) {
                    inserted += 1;
                } else {
                    stats.duplicates_skipped += 1;
                    tracing::trace!("Paragraph {} already indexed, skipping", number);
                }
            }
            stats.paragraphs_inserted += inserted;
            tracing::debug!("Indexed {} paragraphs from {}", inserted, url);

            state = state.transition(WalkState::LocatingNext)?;
            state = match page.next_link {
                Some(href) => {
                    let next = self.resolver.resolve(&href)?;
                    if visited.insert(next.clone()) {
                        tracing::debug!("Next page: {}", next);
                        state.transition(WalkState::Fetching(next))?
                    } else {
                        tracing::warn!(
                            "Next link on {} returns to already visited {}, stopping",
                            url,
                            next
                        );
                        state.transition(WalkState::Done)?
                    }
                }
                None => {
                    tracing::debug!("No next link on {}, chain complete", url);
                    state.transition(WalkState::Done)?
                }
            };
        }

        stats.cache_hits = self.store.cache_hits() - hits_before;
        stats.network_fetches = self.store.network_fetches() - fetches_before;
        stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Walk complete: {} pages, {} paragraphs in {:.2?}",
            stats.pages_visited,
            index.len(),
            stats.elapsed
        );

        Ok(CrawlReport { index, stats })
    }
}
