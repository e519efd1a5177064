use std::cmp::Ordering;
use std::collections::HashMap;

/// Turns the aggregate word table into the reported top-N list
pub trait WordRanker: Send + Sync {
    /// Returns at most `limit` entries, in reporting order
    fn rank(&self, counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)>;
}

/// Ranks by popularity
///
/// Higher counts first; ties go to the longer word, then to the
/// alphabetically smaller one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopularityRanker;

impl WordRanker for PopularityRanker {
    fn rank(&self, counts: &HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();

        entries.sort_by(compare_popularity);
        entries.truncate(limit);
        entries
    }
}

fn compare_popularity(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.len().cmp(&a.0.len()))
        .then_with(|| a.0.cmp(&b.0))
}
