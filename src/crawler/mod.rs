//! Crawler module for the parallel traversal engine
//!
//! This module contains the core crawling logic, including:
//! - The recursive crawl unit and its gating policy
//! - The work-stealing worker pool units run on
//! - Overall crawl coordination
//! - HTTP fetching and HTML parsing for the default page parser

mod coordinator;
mod fetcher;
mod parser;
mod pool;
mod unit;

#[cfg(test)]
mod testing;

pub use coordinator::{CrawlCoordinator, CrawlOptions};
pub use fetcher::{build_http_client, fetch_page, FetchedPage, HttpPageParser};
pub use parser::{parse_html, PageParser, ParsedPage};
pub use pool::{join_units, pool_size, WorkerPool};
pub use unit::{CrawlUnit, SkipReason, UnitContext};

use crate::config::Config;
use crate::output::CrawlResult;
use crate::url::normalize_url;
use crate::CrawlError;
use std::sync::Arc;

/// Runs a complete crawl from configuration
///
/// This is the main entry point for the binary. It will:
/// 1. Build the HTTP page parser (client, ignored words)
/// 2. Compile the crawl options (ignored URLs, timeout)
/// 3. Crawl from the configured start pages, normalized like discovered links
///
/// Blocks until the crawl finishes.
///
/// # Example
///
/// ```no_run
/// use ripple_words::config::load_config;
/// use ripple_words::crawler::crawl;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let result = crawl(&config)?;
/// println!("Visited {} URLs", result.urls_visited);
/// # Ok(())
/// # }
/// ```
pub fn crawl(config: &Config) -> Result<CrawlResult, CrawlError> {
    let parser = HttpPageParser::from_config(config)?;
    let options = CrawlOptions::from_config(&config.crawler)?;
    let seeds = normalize_seeds(&config.crawler.start_pages);
    CrawlCoordinator::new(options, Arc::new(parser)).crawl(&seeds)
}

/// Normalizes start pages the same way page links are normalized
///
/// A seed and a link back to it must claim the same address. Seeds that fail
/// to normalize are kept as written and will fail at fetch time.
pub fn normalize_seeds(start_pages: &[String]) -> Vec<String> {
    start_pages
        .iter()
        .map(|page| match normalize_url(page) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!("Could not normalize start page {}: {}", page, e);
                page.clone()
            }
        })
        .collect()
}
