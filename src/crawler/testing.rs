//! In-memory page parser over a fixed link graph, for tests

use crate::crawler::parser::{PageParser, ParsedPage};
use crate::CrawlError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

type ParseHook = Box<dyn Fn(&str) + Send + Sync>;

/// Serves registered pages; any other address fails with a 404
#[derive(Default)]
pub struct FakeParser {
    pages: HashMap<String, ParsedPage>,
    calls: DashMap<String, usize>,
    hook: Option<ParseHook>,
}

impl FakeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        let page = ParsedPage {
            word_counts: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Runs `hook` at the start of every parse call
    pub fn on_parse(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.get(url).map(|c| *c).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl PageParser for FakeParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;

        if let Some(hook) = &self.hook {
            hook(url);
        }

        self.pages.get(url).cloned().ok_or_else(|| CrawlError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
