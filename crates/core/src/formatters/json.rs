use serde::Serialize;

use crate::article::ArticleContent;
use crate::summarize::SummaryResult;

use super::SummaryView;

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Complete JSON output for a summary run
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput<'a> {
    /// Article the text was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<&'a ArticleContent>,
    pub summary: &'a SummaryResult,
    /// Text that was summarized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<&'a str>,
}

/// Serializes an article.
pub fn article_to_json(article: &ArticleContent, config: &JsonConfig) -> serde_json::Result<String> {
    to_string(article, config.pretty)
}

/// Serializes a summary together with what the view asks for.
///
/// Chunk summaries are always included; `show_chunks` only affects the
/// human-readable formats.
pub fn summary_to_json(
    summary: &SummaryResult, view: &SummaryView<'_>, config: &JsonConfig,
) -> serde_json::Result<String> {
    let output = SummaryOutput { article: view.article, summary, original: view.original };
    to_string(&output, config.pretty)
}

fn to_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) }
}
