use crate::article::ArticleContent;
use crate::summarize::SummaryResult;

use super::SummaryView;

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include title/source header
    pub include_header: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { line_width: 0, include_header: true }
    }
}

/// Renders an article as plain text.
pub fn article_to_text(article: &ArticleContent, config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header {
        output.push_str(&generate_header(article));
        output.push('\n');
    }

    output.push_str(&wrap_text(&article.text, config.line_width));

    if let Some(summary) = &article.auto_summary
        && !summary.is_empty()
    {
        output.push_str("\n\nKey sentences\n-------------\n");
        output.push_str(summary);
    }

    output.trim().to_string()
}

/// Renders a summary as plain text.
pub fn summary_to_text(summary: &SummaryResult, view: &SummaryView<'_>) -> String {
    let mut output = String::new();

    if let Some(article) = view.article {
        output.push_str(&generate_header(article));
        output.push('\n');
    }

    output.push_str(&summary.full_summary);

    if view.show_chunks && !summary.chunk_summaries.is_empty() {
        output.push_str("\n\nChunks\n------\n");
        for (i, chunk) in summary.chunk_summaries.iter().enumerate() {
            output.push_str(&format!("[{}/{}] {}\n", i + 1, summary.chunk_summaries.len(), chunk));
        }
    }

    if let Some(original) = view.original {
        output.push_str("\n\nOriginal text\n-------------\n");
        output.push_str(original);
    }

    output.trim().to_string()
}

/// Generate a header from article metadata
fn generate_header(article: &ArticleContent) -> String {
    let mut header = String::new();

    let title = article.display_title();
    header.push_str(title);
    header.push('\n');
    header.push_str(&"=".repeat(title.chars().count()));
    header.push('\n');

    let mut meta_parts = Vec::new();

    if let Some(url) = &article.source_url {
        meta_parts.push(format!("Source: {}", url));
    }

    meta_parts.push(format!("Method: {}", article.method));
    meta_parts.push(format!("Characters: {}", article.char_count()));

    if let Some(keywords) = &article.keywords
        && !keywords.is_empty()
    {
        meta_parts.push(format!("Keywords: {}", keywords.join(", ")));
    }

    header.push_str(&meta_parts.join(" | "));
    header.push('\n');

    header
}

/// Wrap text to specified width, keeping line breaks
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() { String::new() } else { wrap_words(&words, width) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a slice of words to specified width
fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}
