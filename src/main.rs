//! Ripple-Words main entry point
//!
//! This is the command-line interface for the Ripple-Words crawler.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use ripple_words::config::{load_config_with_hash, validate, Config};
use ripple_words::crawler::{normalize_seeds, HttpPageParser};
use ripple_words::output::{generate_markdown_summary, write_result_json, CrawlSummary};
use ripple_words::{CrawlCoordinator, CrawlOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Ripple-Words: a parallel, depth-limited word-counting crawler
///
/// Ripple-Words crawls outward from a set of start pages, counts the words
/// on every page it reaches within the depth and time limits, and reports
/// the most popular ones.
#[derive(Parser, Debug)]
#[command(name = "ripple-words")]
#[command(version = "1.0.0")]
#[command(about = "A parallel word-counting web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Crawl these start pages instead of the configured ones (repeatable)
    #[arg(long = "start-page", value_name = "URL")]
    start_page: Vec<String>,

    /// Override the configured max depth
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Override the configured number of worker threads
    #[arg(long, value_name = "N")]
    parallelism: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if apply_overrides(&mut config, &cli) {
        validate(&config).context("Command-line overrides produced an invalid configuration")?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, config_hash)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_words=info,warn"),
            1 => EnvFilter::new("ripple_words=debug,info"),
            2 => EnvFilter::new("ripple_words=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so a result printed to stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides; returns whether anything changed
fn apply_overrides(config: &mut Config, cli: &Cli) -> bool {
    let mut changed = false;

    if !cli.start_page.is_empty() {
        config.crawler.start_pages = cli.start_page.clone();
        changed = true;
    }
    if let Some(depth) = cli.max_depth {
        config.crawler.max_depth = depth;
        changed = true;
    }
    if let Some(parallelism) = cli.parallelism {
        config.crawler.parallelism = parallelism;
        changed = true;
    }

    changed
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Words Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!("  Parallelism: {}", config.crawler.parallelism);
    println!("  Popular word count: {}", config.crawler.popular_word_count);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("<none>")
    );

    println!("\nStart Pages ({}):", config.crawler.start_pages.len());
    for page in &config.crawler.start_pages {
        println!("  - {}", page);
    }

    println!("\nIgnored URL Patterns ({}):", config.crawler.ignored_urls.len());
    for pattern in &config.crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored Word Patterns ({}):", config.crawler.ignored_words.len());
    for pattern in &config.crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
fn handle_crawl(config: &Config, config_hash: String) -> anyhow::Result<()> {
    let parser = HttpPageParser::from_config(config).context("Failed to build page parser")?;
    let options =
        CrawlOptions::from_config(&config.crawler).context("Failed to compile crawl options")?;
    let coordinator = CrawlCoordinator::new(options, Arc::new(parser));

    tracing::info!(
        "Start pages: {}, ignored URL patterns: {}, ignored word patterns: {}",
        config.crawler.start_pages.len(),
        config.crawler.ignored_urls.len(),
        config.crawler.ignored_words.len()
    );

    let seeds = normalize_seeds(&config.crawler.start_pages);

    let started_at = Utc::now();
    let result = coordinator.crawl(&seeds).context("Crawl failed")?;
    let finished_at = Utc::now();

    tracing::info!(
        "Crawl completed: {} URLs visited, {} words reported",
        result.urls_visited,
        result.word_counts.len()
    );

    let result_path = config.output.result_path.as_deref().map(Path::new);
    write_result_json(&result, result_path).context("Failed to write crawl result")?;

    if let Some(summary_path) = &config.output.summary_path {
        let summary = CrawlSummary {
            started_at,
            finished_at,
            config_hash: Some(config_hash),
            start_pages: seeds,
            max_depth: config.crawler.max_depth,
            worker_threads: coordinator.worker_threads(),
            popular_word_count: config.crawler.popular_word_count,
            result,
        };
        generate_markdown_summary(&summary, Path::new(summary_path))
            .with_context(|| format!("Failed to write summary to {}", summary_path))?;
        tracing::info!("Summary written to: {}", summary_path);
    }

    Ok(())
}
