//! Extraction output type.
//!
//! [`ArticleContent`] is produced once per extraction attempt and replaced,
//! never edited, by the next one. Which optional fields are present depends
//! on the path that produced it: a structured parse fills every field, the
//! fallback scraper only `text` and `title`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Title reported by the fallback scraper when the page has no `<title>`.
pub const NO_TITLE: &str = "No Title Found";

/// Which extraction path produced an [`ArticleContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Scored-candidate parse with metadata and keyword analysis.
    Structured,
    /// Paragraph scrape of the first `article`/`main`/`body` container.
    Fallback,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Readable text and optional metadata extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    /// Plain article text.
    pub text: String,

    pub title: Option<String>,

    /// Most frequent content terms, most frequent first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Newline-separated key sentences picked from `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_summary: Option<String>,

    /// Absolute image URLs, deduplicated and sorted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<BTreeSet<String>>,

    /// URL the page was fetched from, when it came from the network.
    pub source_url: Option<String>,

    pub method: ExtractionMethod,
}

impl ArticleContent {
    /// A fallback result: text and title only.
    pub fn fallback(text: String, title: String) -> Self {
        Self {
            text,
            title: Some(title),
            keywords: None,
            auto_summary: None,
            images: None,
            source_url: None,
            method: ExtractionMethod::Fallback,
        }
    }

    /// Records the URL the content came from.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Length of `text` in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Title to show users, falling back to a placeholder.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Article")
    }
}
