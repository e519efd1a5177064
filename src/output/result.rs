use crate::output::OutputResult;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Final outcome of one crawl invocation
///
/// Serializes as `{"wordCounts": {...}, "urlsVisited": N}` with the word map
/// kept in ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Ranked (word, count) pairs
    #[serde(serialize_with = "serialize_ordered_map")]
    pub word_counts: Vec<(String, u64)>,

    /// Number of distinct addresses claimed during the crawl
    pub urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Word counts as an unordered map
    pub fn word_count_map(&self) -> HashMap<String, u64> {
        self.word_counts.iter().cloned().collect()
    }
}

fn serialize_ordered_map<S: Serializer>(
    words: &[(String, u64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(words.iter().map(|(word, count)| (word, count)))
}

/// Writes the result as pretty-printed JSON
///
/// # Arguments
///
/// * `result` - The crawl result
/// * `path` - Destination file; stdout when `None`
pub fn write_result_json(result: &CrawlResult, path: Option<&Path>) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(result)?;

    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}
