//! Cinescrape: a resilient movie-catalog scraper
//!
//! This crate walks a bounded range of listing pages, discovers detail-page
//! links, recovers a fixed record schema (name, rating, genre, poster) from
//! pages with no stable markup contract via cascaded heuristics, and writes
//! the merged records to CSV. A secondary subsystem ranks per-area shake
//! intensities from an earthquake-report feed.

pub mod config;
pub mod crawler;
pub mod output;
pub mod quake;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for cinescrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("No listing page could be fetched ({pages_tried} tried); nothing to scrape")]
    ListingUnavailable { pages_tried: u32 },

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid detail-link pattern: {0}")]
    Pattern(String),
}

/// Result type alias for cinescrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use record::{DetailFields, ListingHint, MovieRecord};
pub use self::url::{page_url, resolve, DetailLinkMatcher};
