use crate::output::CrawlResult;
use chrono::{DateTime, Utc};

/// Run metadata plus the result, as rendered in the markdown summary
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: Option<String>,

    // Settings
    pub start_pages: Vec<String>,
    pub max_depth: u32,
    pub worker_threads: usize,
    pub popular_word_count: usize,

    pub result: CrawlResult,
}

impl CrawlSummary {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Sum of the reported word counts
    pub fn reported_occurrences(&self) -> u64 {
        self.result.word_counts.iter().map(|(_, count)| count).sum()
    }
}
