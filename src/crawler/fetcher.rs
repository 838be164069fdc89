//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with a realistic client identity
//! - GET requests for listing and detail pages
//! - Bounded retry with exponential backoff on transient failures
//! - Error classification
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 2xx | Return body |
//! | HTTP 500/502/503/504 | Retry up to `max-retries`, backoff doubling |
//! | Other non-2xx | Immediate error, no retry |
//! | Timeout / connection error | Retry up to `max-retries`, backoff doubling |
//! | Other transport error | Immediate error |

use crate::config::CrawlerConfig;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::time::Duration;

/// HTTP status codes retried before surfacing failure
const RETRY_STATUS: [u16; 4] = [500, 502, 503, 504];

/// Bounded retry-with-backoff policy applied to every fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Base delay; attempt n waits `backoff * 2^(n-1)`
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Delay before retrying after the given (1-based) failed attempt
    fn delay(&self, attempt: u32) -> Duration {
        // attempt is capped by max_retries (<= 10), so the shift cannot overflow
        self.backoff * (1u32 << (attempt.saturating_sub(1)))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body text
///
/// Transient failures (the retryable status set, timeouts, connection
/// errors) are retried with exponential backoff per the policy; anything
/// else surfaces immediately. The caller decides whether a failed URL is
/// fatal or skippable.
pub async fn fetch_page(client: &Client, url: &str, retry: &RetryPolicy) -> Result<String> {
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    return response.text().await.map_err(|e| ScrapeError::Transport {
                        url: url.to_string(),
                        source: e,
                    });
                }

                if RETRY_STATUS.contains(&status.as_u16()) && attempt <= retry.max_retries {
                    tracing::debug!(
                        "HTTP {} for {}, retry {}/{}",
                        status.as_u16(),
                        url,
                        attempt,
                        retry.max_retries
                    );
                    tokio::time::sleep(retry.delay(attempt)).await;
                    continue;
                }

                return Err(ScrapeError::Http {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            Err(e) if (e.is_timeout() || e.is_connect()) && attempt <= retry.max_retries => {
                tracing::debug!("Transport error for {}: {}, retry {}/{}", url, e, attempt, retry.max_retries);
                tokio::time::sleep(retry.delay(attempt)).await;
            }
            Err(e) if e.is_timeout() => {
                return Err(ScrapeError::Timeout {
                    url: url.to_string(),
                });
            }
            Err(e) => {
                return Err(ScrapeError::Transport {
                    url: url.to_string(),
                    source: e,
                });
            }
        }
    }
}
