//! Crawl coordinator - main orchestration logic
//!
//! Walks the configured listing-page range, accumulates discovered detail
//! links across pages (deduplicated by canonical URL, first discovery order
//! preserved), then fetches and extracts every unique detail page, merging
//! listing hints with detail fields. Per-URL failures are logged and
//! skipped; the run only aborts when no listing page at all could be
//! fetched. Execution is strictly sequential with pacing delays between
//! fetches.

use crate::config::Config;
use crate::crawler::discover::discover;
use crate::crawler::extract::extract;
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::output::CrawlStats;
use crate::record::{ListingHint, MovieRecord};
use crate::url::{page_url, DetailLinkMatcher};
use crate::{Result, ScrapeError};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
///
/// Owns the dedup set and the accumulating result sequence for the whole
/// run; nothing else mutates them.
pub struct Coordinator {
    config: Config,
    base: Url,
    matcher: DetailLinkMatcher,
    client: Client,
    retry: RetryPolicy,
}

impl Coordinator {
    /// Creates a new coordinator from a validated configuration
    ///
    /// Configuration is an explicit value, not ambient state; two
    /// coordinators with the same config behave identically.
    pub fn new(config: Config) -> Result<Self> {
        let base = Url::parse(&config.site.base_url)?;
        let matcher = DetailLinkMatcher::new(&config.site.detail_path_prefix)?;
        let client = build_http_client(&config.crawler)?;
        let retry = RetryPolicy::from_config(&config.crawler);

        Ok(Self {
            config,
            base,
            matcher,
            client,
            retry,
        })
    }

    /// Runs the full crawl: discovery across all listing pages, then
    /// extraction per unique detail link
    ///
    /// # Returns
    ///
    /// Merged records in first-discovery order plus run statistics
    pub async fn run(&mut self) -> Result<(Vec<MovieRecord>, CrawlStats)> {
        let mut stats = CrawlStats::start();

        let hints = self.discover_all(&mut stats).await?;
        let records = self.extract_all(&hints, &mut stats).await;

        stats.finish();
        Ok((records, stats))
    }

    /// Phase 1: walk the listing-page range and accumulate unique hints
    async fn discover_all(&self, stats: &mut CrawlStats) -> Result<Vec<ListingHint>> {
        let first = self.config.site.first_page;
        let last = self.config.site.last_page;
        let page_delay = Duration::from_millis(self.config.crawler.page_delay_ms);

        let mut seen: HashSet<String> = HashSet::new();
        let mut hints: Vec<ListingHint> = Vec::new();

        for page in first..=last {
            let url = page_url(&self.base, page)?;
            tracing::info!("Fetching listing page {}/{}: {}", page, last, url);

            match fetch_page(&self.client, url.as_str(), &self.retry).await {
                Ok(body) => {
                    // Html is parsed in a tight scope so it never lives
                    // across an await point.
                    let found = {
                        let document = Html::parse_document(&body);
                        discover(&document, &self.base, &self.matcher)
                    };
                    tracing::info!("Found {} detail links on page {}", found.len(), page);
                    stats.pages_fetched += 1;

                    for hint in found {
                        if seen.insert(hint.detail_url.clone()) {
                            hints.push(hint);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping listing page {}: {}", page, e);
                    stats.pages_failed += 1;
                }
            }

            // politeness pacing, not a correctness requirement
            tokio::time::sleep(page_delay).await;
        }

        if stats.pages_fetched == 0 {
            return Err(ScrapeError::ListingUnavailable {
                pages_tried: last - first + 1,
            });
        }

        stats.links_discovered = hints.len();
        tracing::info!("Total unique detail pages: {}", hints.len());
        Ok(hints)
    }

    /// Phase 2: fetch and extract every unique detail page
    ///
    /// A failed URL is logged and excluded from the output; it is not
    /// retried again within this run.
    async fn extract_all(&self, hints: &[ListingHint], stats: &mut CrawlStats) -> Vec<MovieRecord> {
        let detail_delay = Duration::from_millis(self.config.crawler.detail_delay_ms);
        let mut records = Vec::new();

        for (index, hint) in hints.iter().enumerate() {
            tracing::info!("Parsing detail {}/{}: {}", index + 1, hints.len(), hint.detail_url);

            match fetch_page(&self.client, &hint.detail_url, &self.retry).await {
                Ok(body) => {
                    let fields = {
                        let document = Html::parse_document(&body);
                        extract(&document, &self.base)
                    };
                    records.push(MovieRecord::merge(hint, fields));
                    stats.details_parsed += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", hint.detail_url, e);
                    stats.details_failed += 1;
                }
            }

            tokio::time::sleep(detail_delay).await;
        }

        records
    }
}
