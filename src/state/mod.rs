//! State module for a single crawl invocation
//!
//! This module provides the shared, concurrency-safe structures every crawl
//! unit writes into, plus the time source used to enforce the crawl deadline.
//!
//! # Components
//!
//! - `SharedCrawlState`: Visited-address set and aggregate word-count table
//! - `Clock`: Time source trait, with `SystemClock` and `ManualClock` implementations

mod clock;
mod shared;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use shared::SharedCrawlState;
