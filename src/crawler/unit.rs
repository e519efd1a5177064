//! The recursive unit of crawl work
//!
//! A `CrawlUnit` is one address at one remaining-depth level. Processing it
//! applies the gates (deadline, depth, ignore patterns, claim), fetches and
//! parses the page, merges the page's words into the shared table, then fans
//! out one child per link and waits for the whole subtree.

use crate::crawler::parser::PageParser;
use crate::crawler::pool::join_units;
use crate::state::{Clock, SharedCrawlState};
use crate::url::PatternSet;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;

/// Everything a crawl unit shares with every other unit of the same crawl
pub struct UnitContext {
    /// No unit starts processing at or after this instant
    pub deadline: DateTime<Utc>,

    /// Visited set and word table
    pub state: Arc<SharedCrawlState>,

    /// Addresses never visited
    pub ignored_urls: Arc<PatternSet>,

    /// Fetch/parse collaborator
    pub parser: Arc<dyn PageParser>,

    /// Time source for the deadline check
    pub clock: Arc<dyn Clock>,
}

/// Why a unit stopped before fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DeadlineReached,
    DepthExhausted,
    Ignored,
    AlreadyClaimed,
}

/// One address at one remaining-depth level
#[derive(Clone)]
pub struct CrawlUnit {
    url: String,
    remaining_depth: u32,
    context: Arc<UnitContext>,
}

impl CrawlUnit {
    pub fn new(url: impl Into<String>, remaining_depth: u32, context: Arc<UnitContext>) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
            context,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }

    /// Builds the unit for a link found on this unit's page
    ///
    /// Only called once this unit has passed the depth gate, so
    /// `remaining_depth >= 1` here.
    pub fn child(&self, link: String) -> CrawlUnit {
        CrawlUnit {
            url: link,
            remaining_depth: self.remaining_depth - 1,
            context: Arc::clone(&self.context),
        }
    }

    /// Runs this unit and, transitively, every unit it spawns
    ///
    /// The returned future completes only once all descendants have finished.
    pub fn process(self) -> BoxFuture<'static, ()> {
        async move {
            let children = self.visit().await;
            if !children.is_empty() {
                let units = children.into_iter().map(CrawlUnit::process).collect();
                join_units(units).await;
            }
        }
        .boxed()
    }

    /// Checks the gates in order
    ///
    /// The visited check is the claim itself and runs last, so an ignored
    /// address is never claimed. A depth-0 unit never looks at the patterns.
    pub fn gate(&self) -> Result<(), SkipReason> {
        let context = &self.context;

        if context.clock.now() >= context.deadline {
            return Err(SkipReason::DeadlineReached);
        }
        if self.remaining_depth == 0 {
            return Err(SkipReason::DepthExhausted);
        }
        if context.ignored_urls.matches_any(&self.url) {
            return Err(SkipReason::Ignored);
        }
        if !context.state.claim(&self.url) {
            return Err(SkipReason::AlreadyClaimed);
        }

        Ok(())
    }

    /// Processes this unit's own page and returns the children to run
    async fn visit(&self) -> Vec<CrawlUnit> {
        if let Err(reason) = self.gate() {
            tracing::trace!(url = %self.url, ?reason, "Skipping");
            return Vec::new();
        }

        tracing::debug!(url = %self.url, depth = self.remaining_depth, "Claimed");

        let page = match self.context.parser.parse(&self.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", self.url, e);
                return Vec::new();
            }
        };

        self.context.state.add_counts(&page.word_counts);

        page.links
            .into_iter()
            .map(|link| self.child(link))
            .collect()
    }
}
