//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Detail-link discovery on listing pages
//! - Heuristic field extraction on detail pages
//! - Overall crawl coordination

mod coordinator;
mod discover;
mod extract;
mod fetcher;
mod text;

pub use coordinator::Coordinator;
pub use discover::discover;
pub use extract::extract;
pub use fetcher::{build_http_client, fetch_page, RetryPolicy};

use crate::config::Config;
use crate::output::{CrawlStats, CsvSink, RecordSink};
use crate::Result;
use std::path::Path;

/// Runs a complete crawl and writes the results to the configured sink
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the coordinator from the configuration
/// 2. Discover detail links across the listing-page range
/// 3. Extract and merge a record per unique detail page
/// 4. Write all records to the CSV sink in discovery order
///
/// Partial output is still written when some URLs failed; statistics
/// reflect the discovered-vs-parsed split.
pub async fn crawl(config: Config) -> Result<CrawlStats> {
    let csv_path = config.output.csv_path.clone();

    let mut coordinator = Coordinator::new(config)?;
    let (records, stats) = coordinator.run().await?;

    let mut sink = CsvSink::create(Path::new(&csv_path))?;
    for record in &records {
        sink.append(record)?;
    }
    sink.finish()?;
    tracing::info!("Wrote {} records to {}", records.len(), csv_path);

    Ok(stats)
}
