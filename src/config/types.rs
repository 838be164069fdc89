use serde::Deserialize;

/// Default browser identity sent with every request
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120 Safari/537.36";

const DEFAULT_FEED_URL: &str =
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore/E-A0015-001";

/// Main configuration structure for cinescrape
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub quake: QuakeConfig,
}

/// Source site layout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the site to scrape
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix of detail pages; a detail href is this prefix followed by
    /// a numeric identifier
    #[serde(rename = "detail-path-prefix", default = "default_detail_prefix")]
    pub detail_path_prefix: String,

    /// First listing page to crawl (1-based, inclusive)
    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: u32,

    /// Last listing page to crawl (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: u32,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum retries on transient failures (5xx, timeout, connect)
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff between retries in milliseconds; doubles per attempt
    #[serde(rename = "retry-backoff-ms", default = "default_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Pacing delay between listing-page fetches (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Pacing delay between detail-page fetches (milliseconds)
    #[serde(rename = "detail-delay-ms", default = "default_detail_delay_ms")]
    pub detail_delay_ms: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV file to write
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

/// Earthquake feed configuration (secondary subsystem)
#[derive(Debug, Clone, Deserialize)]
pub struct QuakeConfig {
    /// Live feed endpoint
    #[serde(rename = "feed-url", default = "default_feed_url")]
    pub feed_url: String,

    /// Static local copy used when no credential is supplied
    #[serde(rename = "sample-path", default = "default_sample_path")]
    pub sample_path: String,

    /// Feed credential; absent means offline fallback. The API_TOKEN
    /// environment variable takes over when this is unset.
    #[serde(rename = "api-token", default)]
    pub api_token: Option<String>,

    /// Maximum reports taken from the live feed
    #[serde(rename = "live-limit", default = "default_live_limit")]
    pub live_limit: usize,

    /// Maximum reports taken from the sample file
    #[serde(rename = "sample-limit", default = "default_sample_limit")]
    pub sample_limit: usize,
}

impl Default for QuakeConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            sample_path: default_sample_path(),
            api_token: None,
            live_limit: default_live_limit(),
            sample_limit: default_sample_limit(),
        }
    }
}

fn default_detail_prefix() -> String {
    "/detail/".to_string()
}

fn default_first_page() -> u32 {
    1
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_retries() -> u32 {
    5
}

fn default_backoff_ms() -> u64 {
    500
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_detail_delay_ms() -> u64 {
    700
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_sample_path() -> String {
    "sample_data.json".to_string()
}

fn default_live_limit() -> usize {
    10
}

fn default_sample_limit() -> usize {
    5
}
