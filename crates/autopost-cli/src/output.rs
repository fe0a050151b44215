//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use autopost_extractor::EnrichmentReport;
use autopost_generator::{GeneratedPost, PostSource};
use autopost_store::CorpusStore;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a drafted post.
    pub fn format_post(&self, post: &GeneratedPost) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let source = match post.source {
                    PostSource::Model => "model",
                    PostSource::Fallback => "fallback",
                };
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "text": post.text,
                    "source": source,
                }))?)
            }
            OutputFormat::Text => {
                if post.source == PostSource::Fallback {
                    Ok(format!(
                        "{}\n\n{}",
                        self.warning("Model unavailable, showing a template post."),
                        post.text
                    ))
                } else {
                    Ok(post.text.clone())
                }
            }
            OutputFormat::Quiet => Ok(post.text.clone()),
        }
    }

    /// Format an enrichment report.
    pub fn format_report(&self, report: &EnrichmentReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let merged: Vec<serde_json::Value> = report
                    .merged
                    .iter()
                    .map(|(raw, canonical)| serde_json::json!({ "from": raw, "to": canonical }))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "posts_processed": report.posts_processed,
                    "posts_normalized": report.posts_normalized,
                    "tags_before": report.tags_before,
                    "tags_after": report.tags_after,
                    "merged": merged,
                    "elapsed_ms": report.elapsed_ms,
                }))?)
            }
            OutputFormat::Text => Ok(report.summary()),
            OutputFormat::Quiet => Ok(report.posts_processed.to_string()),
        }
    }

    /// Format the corpus tag list with post counts.
    pub fn format_tags(&self, store: &CorpusStore) -> Result<String> {
        let tags = store.tags();
        match self.format {
            OutputFormat::Json => {
                let json_tags: Vec<serde_json::Value> = tags
                    .iter()
                    .map(|tag| serde_json::json!({ "tag": tag, "posts": store.tag_count(tag) }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json_tags)?)
            }
            OutputFormat::Text => {
                if tags.is_empty() {
                    return Ok(self.colorize("No tags found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Tag", "Posts"]);
                for tag in &tags {
                    builder.push_record([tag.to_string(), store.tag_count(tag).to_string()]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(tags.join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
