//! Crawler coordinator - crawl invocation entry point
//!
//! This module owns the lifecycle of one crawl:
//! - Computing the deadline and building fresh shared state
//! - Starting a worker pool and submitting one root unit per start page
//! - Waiting for the whole unit forest to drain
//! - Ranking the aggregate word table into the final result

use crate::config::CrawlerConfig;
use crate::crawler::parser::PageParser;
use crate::crawler::pool::{pool_size, WorkerPool};
use crate::crawler::unit::{CrawlUnit, UnitContext};
use crate::output::{CrawlResult, PopularityRanker, WordRanker};
use crate::state::{Clock, SharedCrawlState, SystemClock};
use crate::url::PatternSet;
use crate::{ConfigError, CrawlError};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Settings that bound a crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Wall-clock budget measured from the start of `crawl`
    pub timeout: Duration,

    /// Remaining depth given to every root unit
    pub max_depth: u32,

    /// Maximum number of entries in the ranked result
    pub popular_word_count: usize,

    /// Addresses never visited
    pub ignored_urls: PatternSet,

    /// Requested worker threads, capped by the hardware
    pub parallelism: usize,
}

impl CrawlOptions {
    /// Builds options from the `[crawler]` section
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOptions)` - Patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - An ignored-url pattern is invalid
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout: Duration::from_secs(config.timeout_seconds),
            max_depth: config.max_depth,
            popular_word_count: config.popular_word_count,
            ignored_urls: PatternSet::new(&config.ignored_urls)?,
            parallelism: config.parallelism,
        })
    }
}

/// Runs crawls over a page parser
///
/// The coordinator itself keeps no per-crawl state: each call to
/// [`crawl`](Self::crawl) starts from an empty visited set and word table.
pub struct CrawlCoordinator {
    options: CrawlOptions,
    ignored_urls: Arc<PatternSet>,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    ranker: Box<dyn WordRanker>,
}

impl CrawlCoordinator {
    /// Creates a coordinator using the wall clock and popularity ranking
    pub fn new(options: CrawlOptions, parser: Arc<dyn PageParser>) -> Self {
        let ignored_urls = Arc::new(options.ignored_urls.clone());
        Self {
            options,
            ignored_urls,
            parser,
            clock: Arc::new(SystemClock),
            ranker: Box::new(PopularityRanker),
        }
    }

    /// Replaces the time source used for the deadline
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the ranking applied to the final word table
    pub fn with_ranker(mut self, ranker: Box<dyn WordRanker>) -> Self {
        self.ranker = ranker;
        self
    }

    /// Number of worker threads a crawl will run with
    pub fn worker_threads(&self) -> usize {
        pool_size(self.options.parallelism)
    }

    /// Crawls from `starting_urls` until the forest drains
    ///
    /// Blocks the calling thread; must not be called from inside an async
    /// context (use `spawn_blocking` there). Page failures never surface
    /// here, they only shrink the result.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - Ranked word counts and the number of visited URLs
    /// * `Err(CrawlError::Pool)` - The worker pool could not be started
    pub fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult, CrawlError> {
        let deadline = deadline_after(self.clock.now(), self.options.timeout);
        let state = Arc::new(SharedCrawlState::new());

        let context = Arc::new(UnitContext {
            deadline,
            state: Arc::clone(&state),
            ignored_urls: Arc::clone(&self.ignored_urls),
            parser: Arc::clone(&self.parser),
            clock: Arc::clone(&self.clock),
        });

        let pool = WorkerPool::new(self.options.parallelism)?;
        tracing::info!(
            "Crawling {} start pages (max depth {}, {} workers, deadline {})",
            starting_urls.len(),
            self.options.max_depth,
            pool.size(),
            deadline.to_rfc3339()
        );

        let roots = starting_urls
            .iter()
            .map(|url| {
                let unit = CrawlUnit::new(url.clone(), self.options.max_depth, Arc::clone(&context));
                pool.submit(unit.process())
            })
            .collect();

        pool.drain(roots);
        pool.shutdown();

        let urls_visited = state.urls_visited();
        if state.is_empty() {
            tracing::info!("Crawl finished: {} URLs visited, no words", urls_visited);
            return Ok(CrawlResult::new(Vec::new(), urls_visited));
        }

        let counts = state.word_counts();
        tracing::info!(
            "Crawl finished: {} URLs visited, {} distinct words",
            urls_visited,
            counts.len()
        );

        let ranked = self.ranker.rank(&counts, self.options.popular_word_count);
        Ok(CrawlResult::new(ranked, urls_visited))
    }
}

/// `now + timeout`, saturating at the latest representable instant
fn deadline_after(now: DateTime<Utc>, timeout: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(timeout)
        .ok()
        .and_then(|timeout| now.checked_add_signed(timeout))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
