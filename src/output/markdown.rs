//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl: run
//! metadata, the settings it ran with, and the popular-word table.

use crate::output::summary::CrawlSummary;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown summary to `output_path`
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Ripple-Words Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        summary.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        summary.duration_seconds()
    ));
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Settings
    md.push_str("## Settings\n\n");
    md.push_str(&format!("- **Max Depth**: {}\n", summary.max_depth));
    md.push_str(&format!("- **Worker Threads**: {}\n", summary.worker_threads));
    md.push_str(&format!(
        "- **Popular Word Count**: {}\n",
        summary.popular_word_count
    ));
    md.push_str("- **Start Pages**:\n");
    for page in &summary.start_pages {
        md.push_str(&format!("  - {}\n", page));
    }
    md.push('\n');

    // Totals
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **URLs Visited**: {}\n",
        summary.result.urls_visited
    ));
    md.push_str(&format!(
        "- **Words Reported**: {}\n",
        summary.result.word_counts.len()
    ));
    md.push_str(&format!(
        "- **Occurrences Reported**: {}\n\n",
        summary.reported_occurrences()
    ));

    // Popular words
    if summary.result.word_counts.is_empty() {
        md.push_str("No words were collected.\n");
    } else {
        md.push_str("## Popular Words\n\n");
        md.push_str("| Rank | Word | Count |\n");
        md.push_str("|------|------|-------|\n");
        for (rank, (word, count)) in summary.result.word_counts.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", rank + 1, word, count));
        }
        md.push('\n');
    }

    md
}
