//! Rendering of extracted articles and summaries for output.

pub mod json;
pub mod markdown;
pub mod text;

use std::fmt;
use std::str::FromStr;

use crate::article::ArticleContent;
use crate::summarize::SummaryResult;

pub use json::{JsonConfig, article_to_json, summary_to_json};
pub use markdown::{MarkdownConfig, article_to_markdown, summary_to_markdown};
pub use text::{TextConfig, article_to_text, summary_to_text};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text with an underlined title header.
    #[default]
    Text,
    /// Markdown with TOML frontmatter.
    Markdown,
    /// JSON (structured data).
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{}'", other)),
        }
    }
}

/// Renders an extracted article in `format` with default options.
pub fn render_article(article: &ArticleContent, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(article_to_text(article, &TextConfig::default())),
        OutputFormat::Markdown => Ok(article_to_markdown(article, &MarkdownConfig::default())),
        OutputFormat::Json => article_to_json(article, &JsonConfig::default()),
    }
}

/// What to show alongside a summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryView<'a> {
    /// List every chunk summary, not just the joined one.
    pub show_chunks: bool,
    /// Original text to append, if requested.
    pub original: Option<&'a str>,
    /// Article the text came from, if it was extracted.
    pub article: Option<&'a ArticleContent>,
}

/// Renders a summary in `format`.
pub fn render_summary(summary: &SummaryResult, view: &SummaryView<'_>, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(summary_to_text(summary, view)),
        OutputFormat::Markdown => Ok(summary_to_markdown(summary, view)),
        OutputFormat::Json => summary_to_json(summary, view, &JsonConfig::default()),
    }
}
