//! Output module for ranking and reporting crawl results
//!
//! This module handles:
//! - The `CrawlResult` value returned by a crawl
//! - Ranking the aggregate word table down to the popular words
//! - Writing the result as JSON and the run summary as markdown

mod markdown;
mod ranking;
mod result;
mod summary;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use ranking::{PopularityRanker, WordRanker};
pub use result::{write_result_json, CrawlResult};
pub use summary::CrawlSummary;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
