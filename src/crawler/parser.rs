//! Page parsing: word counts and outgoing links
//!
//! This module defines the fetch/parse collaborator contract the crawl units
//! depend on, and the HTML extraction used by the default implementation:
//! - Words from visible body text (lowercased, alphanumeric only)
//! - Links from `<a href>` tags, resolved and normalized

use crate::url::{normalize_url, PatternSet};
use crate::CrawlError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never counted
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// What one page contributed to the crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Word -> occurrences on this page
    pub word_counts: HashMap<String, u64>,

    /// Outgoing links, in document order
    pub links: Vec<String>,
}

/// Fetches and parses a single address
///
/// Implementations must eventually return. An `Err` only affects the unit
/// that asked for the page.
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlError>;
}

/// Parses HTML content into word counts and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only links
/// - Anything that fails to normalize
///
/// # Word Extraction Rules
///
/// Text under `<body>` (outside script/style) is split on whitespace, each
/// token keeps only its alphanumeric characters and is lowercased. Empty
/// tokens and tokens fully matching `ignored_words` are dropped.
///
/// # Example
///
/// ```
/// use ripple_words::crawler::parse_html;
/// use ripple_words::url::PatternSet;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello, hello world!</p><a href="/next">Next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, &PatternSet::default());
/// assert_eq!(parsed.word_counts["hello"], 2);
/// assert_eq!(parsed.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternSet) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: extract_words(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words in the document body
fn extract_words(document: &Html, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| SKIPPED_ELEMENTS.contains(&name));
        if skipped {
            continue;
        }

        for token in text.split_whitespace() {
            if let Some(word) = clean_word(token) {
                if !ignored_words.matches_any(&word) {
                    *counts.entry(word).or_insert(0) += 1;
                }
            }
        }
    }

    counts
}

/// Strips non-alphanumeric characters and lowercases
fn clean_word(token: &str) -> Option<String> {
    let word: String = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Extracts all followable links from the document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to a normalized absolute URL
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match normalize_url(absolute_url.as_str()) {
        Ok(normalized) => Some(normalized.to_string()),
        Err(e) => {
            tracing::trace!("Dropping link {}: {}", absolute_url, e);
            None
        }
    }
}
