use crate::article::ArticleContent;
use crate::summarize::SummaryResult;

use super::SummaryView;

/// Configuration for Markdown output
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Include TOML frontmatter with metadata
    pub include_frontmatter: bool,
    /// Include title as H1 heading at the start of content
    pub include_title_heading: bool,
    /// List image URLs after the text
    pub include_images: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { include_frontmatter: true, include_title_heading: true, include_images: true }
    }
}

/// Renders an article as Markdown.
pub fn article_to_markdown(article: &ArticleContent, config: &MarkdownConfig) -> String {
    let mut output = String::new();

    if config.include_frontmatter {
        output.push_str(&generate_frontmatter(article));
        output.push('\n');
    }

    if config.include_title_heading {
        output.push_str(&format!("# {}\n\n", article.display_title()));
    }

    output.push_str(&paragraphs(&article.text));
    output.push('\n');

    if let Some(summary) = &article.auto_summary
        && !summary.is_empty()
    {
        output.push_str("\n## Key sentences\n\n");
        for sentence in summary.lines() {
            output.push_str(&format!("- {}\n", sentence));
        }
    }

    if config.include_images
        && let Some(images) = &article.images
        && !images.is_empty()
    {
        output.push_str("\n## Images\n\n");
        for image in images {
            output.push_str(&format!("- <{}>\n", image));
        }
    }

    output
}

/// Renders a summary as Markdown.
pub fn summary_to_markdown(summary: &SummaryResult, view: &SummaryView<'_>) -> String {
    let mut output = String::new();

    if let Some(article) = view.article {
        output.push_str(&generate_frontmatter(article));
        output.push('\n');
        output.push_str(&format!("# {}\n\n", article.display_title()));
    }

    output.push_str("## Summary\n\n");
    output.push_str(&summary.full_summary);
    output.push('\n');

    if view.show_chunks && !summary.chunk_summaries.is_empty() {
        output.push_str("\n## Chunk summaries\n\n");
        for (i, chunk) in summary.chunk_summaries.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, chunk));
        }
    }

    if let Some(original) = view.original {
        output.push_str("\n<details>\n<summary>Original text</summary>\n\n");
        output.push_str(&paragraphs(original));
        output.push_str("\n\n</details>\n");
    }

    output
}

/// Generate TOML frontmatter from article metadata
fn generate_frontmatter(article: &ArticleContent) -> String {
    let mut frontmatter = String::from("+++");

    if let Some(title) = &article.title {
        frontmatter.push_str(&format!("\ntitle = {}", toml_escape_string(title)));
    }

    if let Some(url) = &article.source_url {
        frontmatter.push_str(&format!("\nsource = {}", toml_escape_string(url)));
    }

    frontmatter.push_str(&format!("\nmethod = \"{}\"", article.method));
    frontmatter.push_str(&format!("\ncharacters = {}", article.char_count()));

    if let Some(keywords) = &article.keywords {
        let items: Vec<String> = keywords.iter().map(|k| toml_escape_string(k)).collect();
        frontmatter.push_str(&format!("\nkeywords = [{}]", items.join(", ")));
    }

    frontmatter.push_str("\n+++\n");

    frontmatter
}

/// Escape a string for TOML format
fn toml_escape_string(s: &str) -> String {
    let needs_escape = s.contains('"') || s.contains('\\') || s.contains('\n');
    if needs_escape {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('\"', "\\\"").replace('\n', "\\n"))
    } else {
        format!("\"{}\"", s)
    }
}

/// Each non-empty line becomes its own Markdown paragraph.
fn paragraphs(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ExtractionMethod;
    use std::collections::BTreeSet;

    fn structured() -> ArticleContent {
        ArticleContent {
            text: "First paragraph.\n\nSecond paragraph.".to_string(),
            title: Some("A \"quoted\" title".to_string()),
            keywords: Some(vec!["first".to_string()]),
            auto_summary: Some("First paragraph.\nSecond paragraph.".to_string()),
            images: Some(BTreeSet::from(["https://example.com/a.jpg".to_string()])),
            source_url: Some("https://example.com/a".to_string()),
            method: ExtractionMethod::Structured,
        }
    }

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string("plain"), "\"plain\"");
        assert_eq!(toml_escape_string("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(toml_escape_string("line\nbreak"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_article_to_markdown() {
        let md = article_to_markdown(&structured(), &MarkdownConfig::default());

        assert!(md.starts_with("+++\ntitle = \"A \\\"quoted\\\" title\""));
        assert!(md.contains("method = \"structured\""));
        assert!(md.contains("keywords = [\"first\"]"));
        assert!(md.contains("# A \"quoted\" title\n\nFirst paragraph.\n\nSecond paragraph.\n"));
        assert!(md.contains("- Second paragraph.\n"));
        assert!(md.contains("- <https://example.com/a.jpg>"));
    }

    #[test]
    fn test_fallback_markdown_has_no_optional_sections() {
        let article = ArticleContent::fallback("One\nTwo".to_string(), "T".to_string());
        let md = article_to_markdown(&article, &MarkdownConfig::default());

        assert!(md.contains("One\n\nTwo"));
        assert!(!md.contains("keywords"));
        assert!(!md.contains("## Key sentences"));
        assert!(!md.contains("## Images"));
    }

    #[test]
    fn test_summary_to_markdown() {
        let summary = SummaryResult::new(vec!["s1".to_string(), "s2".to_string()], "lead");
        let view = SummaryView { show_chunks: true, original: Some("Orig"), article: None };
        let md = summary_to_markdown(&summary, &view);

        assert!(md.starts_with("## Summary\n\ns1 s2\n"));
        assert!(md.contains("1. s1\n2. s2\n"));
        assert!(md.contains("<details>"));
        assert!(md.contains("Orig"));
    }
}
