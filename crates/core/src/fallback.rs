//! Generic paragraph scraper used when the structured parse comes up short.
//!
//! The rules are blunt: drop a fixed set of non-content tags,
//! take the first `article`, else `main`, else `body`, and keep the trimmed
//! text of every `p` inside it. A related-stories widget wrapped in its own
//! `<article>` ahead of the story will win the container choice.

use crate::article::{ArticleContent, NO_TITLE};
use crate::parse::{Document, Element};
use crate::preprocess::strip_elements;
use crate::ExtractionError;

/// Tags removed, with their content, before looking for paragraphs.
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "aside", "figure"];

/// Containers tried in order.
const CONTAINERS: &[&str] = &["article", "main", "body"];

/// Scrapes paragraph text out of `html`.
///
/// Returns [`ExtractionError::NoContent`] when no non-empty paragraph is
/// found.
pub fn scrape(html: &str) -> Result<ArticleContent, ExtractionError> {
    let cleaned = strip_elements(html, STRIPPED_TAGS);
    let doc = Document::parse(&cleaned);

    let Some(container) = find_container(&doc)? else {
        return Err(ExtractionError::NoContent);
    };

    let paragraphs: Vec<String> = container
        .select("p")?
        .iter()
        .map(|p| p.text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(ExtractionError::NoContent);
    }

    tracing::debug!(container = %container.tag_name(), paragraphs = paragraphs.len(), "fallback scrape finished");

    let title = doc.title().unwrap_or_else(|| NO_TITLE.to_string());
    Ok(ArticleContent::fallback(paragraphs.join("\n"), title))
}

fn find_container(doc: &Document) -> Result<Option<Element<'_>>, ExtractionError> {
    for selector in CONTAINERS {
        if let Some(element) = doc.select_first(selector)? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}
