//! Page fetcher implementation
//!
//! This module handles retrieving page bodies for the default parser:
//! - Building HTTP clients with proper user agent strings
//! - GET requests with status and Content-Type checks
//! - Reading `file:` pages from disk

use crate::config::{Config, UserAgentConfig};
use crate::crawler::parser::{parse_html, PageParser, ParsedPage};
use crate::url::PatternSet;
use crate::{CrawlError, UrlError};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Idle connections are not pooled: every crawl runs on its own worker
/// runtime, and a pooled connection would be bound to a runtime that has
/// already shut down.
///
/// # Example
///
/// ```no_run
/// use ripple_words::config::UserAgentConfig;
/// use ripple_words::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "RippleWords".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(0)
        .gzip(true)
        .brotli(true)
        .build()
}

/// A fetched page body and the address it was actually served from
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Address after redirects; relative links resolve against this
    pub final_url: Url,
    pub body: String,
}

/// Fetches the body of a page
///
/// | Condition | Result |
/// |-----------|--------|
/// | Transport error / timeout | `CrawlError::Http` |
/// | Non-2xx status | `CrawlError::Status` |
/// | Content-Type present and not HTML | `CrawlError::ContentMismatch` |
/// | `file:` path unreadable | `CrawlError::Io` |
/// | `file:` content not UTF-8 | `CrawlError::HtmlParse` |
/// | Any other scheme | `CrawlError::UnsupportedScheme` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, CrawlError> {
    match url.scheme() {
        "http" | "https" => fetch_http(client, url).await,
        "file" => read_file(url).await,
        _ => Err(CrawlError::UnsupportedScheme {
            url: url.to_string(),
        }),
    }
}

async fn fetch_http(client: &Client, url: &Url) -> Result<FetchedPage, CrawlError> {
    let http_error = |source| CrawlError::Http {
        url: url.to_string(),
        source,
    };

    let response = client.get(url.clone()).send().await.map_err(http_error)?;

    let final_url = response.url().clone();
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !content_type.contains("text/html") {
            return Err(CrawlError::ContentMismatch {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }
    }

    let body = response.text().await.map_err(http_error)?;
    Ok(FetchedPage { final_url, body })
}

async fn read_file(url: &Url) -> Result<FetchedPage, CrawlError> {
    let path = url
        .to_file_path()
        .map_err(|_| UrlError::Malformed(format!("Not a local file path: {}", url)))?;

    let bytes = tokio::fs::read(&path).await?;
    let body = String::from_utf8(bytes).map_err(|e| CrawlError::HtmlParse {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    Ok(FetchedPage {
        final_url: url.clone(),
        body,
    })
}

/// The default fetch/parse collaborator
///
/// Fetches each page over HTTP (or from disk for `file:` addresses) and runs
/// it through [`parse_html`].
pub struct HttpPageParser {
    client: Client,
    ignored_words: PatternSet,
}

impl HttpPageParser {
    pub fn new(client: Client, ignored_words: PatternSet) -> Self {
        Self {
            client,
            ignored_words,
        }
    }

    /// Builds the client and word filter from configuration
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.user_agent)?;
        let ignored_words = PatternSet::new(&config.crawler.ignored_words)?;
        Ok(Self::new(client, ignored_words))
    }
}

#[async_trait]
impl PageParser for HttpPageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, CrawlError> {
        let parsed_url = Url::parse(url).map_err(|e| UrlError::Parse(e.to_string()))?;
        let page = fetch_page(&self.client, &parsed_url).await?;
        Ok(parse_html(&page.body, &page.final_url, &self.ignored_words))
    }
}
