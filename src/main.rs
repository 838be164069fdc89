//! Cinescrape main entry point
//!
//! Command-line interface for the movie-catalog scraper and the
//! earthquake-report display feed.

use cinescrape::config::load_config_with_hash;
use cinescrape::crawler::crawl;
use cinescrape::output::print_summary;
use cinescrape::quake::{load_live, load_sample, ranked_areas, QuakeReport};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Cinescrape: a resilient movie-catalog scraper
///
/// Walks a bounded range of listing pages, extracts a fixed record schema
/// from detail pages via cascaded heuristics, and writes the results to
/// CSV. Also serves an earthquake-report feed with ranked per-area
/// intensities.
#[derive(Parser, Debug)]
#[command(name = "cinescrape")]
#[command(version = "1.0.0")]
#[command(about = "A resilient movie-catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "quake_report")]
    dry_run: bool,

    /// Print ranked earthquake intensity reports and exit
    #[arg(long)]
    quake_report: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.quake_report {
        handle_quake_report(&config).await?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("cinescrape=info,warn"),
            1 => EnvFilter::new("cinescrape=debug,info"),
            2 => EnvFilter::new("cinescrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &cinescrape::config::Config) {
    println!("=== Cinescrape Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Detail path prefix: {}", config.site.detail_path_prefix);
    println!(
        "  Listing pages: {}..={}",
        config.site.first_page, config.site.last_page
    );

    println!("\nCrawler:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!(
        "  Retries: {} (backoff {}ms, doubling)",
        config.crawler.max_retries, config.crawler.retry_backoff_ms
    );
    println!(
        "  Pacing: {}ms between pages, {}ms between details",
        config.crawler.page_delay_ms, config.crawler.detail_delay_ms
    );

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\nQuake feed:");
    println!("  Endpoint: {}", config.quake.feed_url);
    println!("  Sample fallback: {}", config.quake.sample_path);
    println!(
        "  Credential: {}",
        if config.quake.api_token.is_some() {
            "configured"
        } else {
            "none (sample fallback)"
        }
    );

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl {} listing pages",
        config.site.last_page - config.site.first_page + 1
    );
}

/// Handles the --quake-report mode: loads the feed and prints ranked areas
async fn handle_quake_report(
    config: &cinescrape::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config
        .quake
        .api_token
        .clone()
        .or_else(|| std::env::var("API_TOKEN").ok())
        .filter(|token| !token.is_empty());

    let reports = match token {
        Some(token) => {
            tracing::info!("Loading live feed from {}", config.quake.feed_url);
            let client = cinescrape::crawler::build_http_client(&config.crawler)?;
            load_live(
                &client,
                &config.quake.feed_url,
                &token,
                config.quake.live_limit,
            )
            .await?
        }
        None => {
            tracing::info!(
                "No credential supplied, using sample data from {}",
                config.quake.sample_path
            );
            load_sample(Path::new(&config.quake.sample_path), config.quake.sample_limit)?
        }
    };

    if reports.is_empty() {
        println!("No earthquake reports available.");
        return Ok(());
    }

    for report in &reports {
        print_quake_report(report);
    }

    Ok(())
}

/// Prints one report with its deduplicated, ranked intensity areas
fn print_quake_report(report: &QuakeReport) {
    let number = report
        .number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    let magnitude = match (report.magnitude_value, &report.magnitude_type) {
        (Some(value), Some(kind)) => format!("{} {}", kind, value),
        (Some(value), None) => format!("M {}", value),
        _ => "magnitude unknown".to_string(),
    };

    println!(
        "=== Earthquake {} | {} | {} ===",
        number,
        magnitude,
        report.origin_time.as_deref().unwrap_or("")
    );
    if let Some(content) = &report.content {
        println!("{}", content);
    }
    if let Some(image) = &report.image_uri {
        println!("Report image: {}", image);
    }

    let areas = ranked_areas(&report.areas);
    if areas.is_empty() {
        println!("No intensity distribution for this report.");
    } else {
        println!("Intensity by area:");
        for area in &areas {
            println!("  - {} | {} | {}", area.county, area.description, area.label);
        }
    }
    println!();
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: cinescrape::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of pages {}..={} at {}",
        config.site.first_page,
        config.site.last_page,
        config.site.base_url
    );

    match crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_summary(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
