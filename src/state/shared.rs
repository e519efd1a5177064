use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Shared mutable state for one crawl invocation
///
/// Every crawl unit of a single `crawl` call holds a reference to the same
/// instance. The visited set and the word table are only ever mutated through
/// [`claim`](Self::claim) and [`add_counts`](Self::add_counts); both are atomic
/// with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct SharedCrawlState {
    /// Addresses claimed for processing
    visited: DashSet<String>,

    /// Aggregate word -> occurrence count across all merged pages
    counts: DashMap<String, u64>,
}

impl SharedCrawlState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims an address for processing
    ///
    /// Test and insert happen as one operation on the shard owning `url`, so
    /// when several units race on the same address exactly one of them sees
    /// `true`.
    ///
    /// # Returns
    ///
    /// * `true` - This call inserted the address and owns it
    /// * `false` - The address had already been claimed
    pub fn claim(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Folds one page's word counts into the aggregate table
    ///
    /// Each entry is added under the write lock of the shard holding that
    /// word, so concurrent merges of the same word never lose updates while
    /// unrelated words proceed in parallel.
    pub fn add_counts(&self, page_counts: &HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Number of distinct addresses claimed so far
    pub fn urls_visited(&self) -> usize {
        self.visited.len()
    }

    /// Returns true if no words have been merged yet
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Copies the aggregate table out
    ///
    /// Only meaningful once every unit has finished.
    pub fn word_counts(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
