//! Run statistics
//!
//! Tracks the discovered-vs-parsed split for the completion summary. The
//! counts are the user-visible outcome of a run: partial output is normal,
//! so the summary must say how partial.

use chrono::{DateTime, Utc};

/// Statistics for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStats {
    /// Listing pages fetched successfully
    pub pages_fetched: u32,

    /// Listing pages skipped after transport failure
    pub pages_failed: u32,

    /// Unique detail links discovered across all listing pages
    pub links_discovered: usize,

    /// Detail pages fetched and extracted successfully
    pub details_parsed: usize,

    /// Detail pages skipped after transport failure
    pub details_failed: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    /// Starts a fresh counter set stamped with the current time
    pub fn start() -> Self {
        Self {
            pages_fetched: 0,
            pages_failed: 0,
            links_discovered: 0,
            details_parsed: 0,
            details_failed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Stamps the completion time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, if finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

/// Prints the completion summary to stdout
pub fn print_summary(stats: &CrawlStats) {
    println!("=== Crawl Summary ===\n");

    println!("Listing pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Failed:  {}", stats.pages_failed);
    println!();

    println!("Detail pages:");
    println!("  Discovered: {}", stats.links_discovered);
    println!("  Parsed:     {}", stats.details_parsed);
    println!("  Failed:     {}", stats.details_failed);
    println!();

    if let Some(duration) = stats.duration() {
        let seconds = duration.num_milliseconds() as f64 / 1000.0;
        println!("Finished in {:.1}s", seconds);
    }

    let success_rate = if stats.links_discovered > 0 {
        (stats.details_parsed as f64 / stats.links_discovered as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "Success rate: {:.1}% ({} / {} discovered records parsed)",
        success_rate, stats.details_parsed, stats.links_discovered
    );
}
