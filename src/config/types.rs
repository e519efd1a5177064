use serde::Deserialize;

/// Main configuration structure for Ripple-Words
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Addresses the crawl starts from
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// Regular expressions; matching addresses are never visited
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Regular expressions; matching words are not counted
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,

    /// Maximum link depth followed from each start page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Requested number of worker threads
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Number of most popular words kept in the result
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where the JSON result is written; stdout when absent
    #[serde(rename = "result-path")]
    pub result_path: Option<String>,

    /// Where the markdown summary is written, if anywhere
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
