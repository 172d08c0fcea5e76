//! Structured article parse.
//!
//! Scores every paragraph, credits its parent and grandparent containers,
//! and takes the paragraphs of the best-scoring container as the article
//! text. Title and images come from the page head, keywords and the
//! auto-summary from [`crate::nlp`].

use url::Url;

use crate::article::{ArticleContent, ExtractionMethod, NO_TITLE};
use crate::nlp;
use crate::parse::{Document, Element};
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::scoring::{ScoreConfig, base_tag_score, class_id_weight, link_density, paragraph_score};
use crate::ExtractionError;

/// Configuration for the structured parser
#[derive(Debug, Clone)]
pub struct StructuredConfig {
    pub preprocess: PreprocessConfig,
    pub score: ScoreConfig,
    /// Number of keywords to report
    pub keyword_count: usize,
    /// Number of sentences in the auto-summary
    pub summary_sentences: usize,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            score: ScoreConfig::default(),
            keyword_count: nlp::KEYWORD_COUNT,
            summary_sentences: nlp::SUMMARY_SENTENCES,
        }
    }
}

/// A container element with its accumulated score
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Parses `html` with the default configuration.
pub fn parse(html: &str, base_url: Option<&Url>) -> Result<ArticleContent, ExtractionError> {
    parse_with_config(html, base_url, &StructuredConfig::default())
}

/// Parses `html` into a structured [`ArticleContent`].
///
/// Every metadata field of the result is `Some`; the text may be empty when
/// the page has no scorable paragraphs. Deciding whether the text is long
/// enough is left to the caller.
pub fn parse_with_config(
    html: &str, base_url: Option<&Url>, config: &StructuredConfig,
) -> Result<ArticleContent, ExtractionError> {
    let raw = Document::parse_with_url(html, base_url.cloned());
    let metadata = raw.extract_metadata();

    let cleaned = preprocess_html(html, &config.preprocess);
    let doc = Document::parse_with_url(&cleaned, base_url.cloned());

    let candidates = score_candidates(&doc, &config.score)?;
    let top = select_top_candidate(&candidates);

    let text = match top {
        Some(candidate) => paragraph_text(&candidate.element)?,
        None => match doc.body() {
            Some(body) => paragraph_text(&body)?,
            None => String::new(),
        },
    };

    let page_title = metadata.title.as_deref().unwrap_or_default();

    let mut keywords: Vec<String> = Vec::with_capacity(config.keyword_count);
    let found = nlp::keywords(page_title, &text, config.keyword_count);
    for keyword in metadata.meta_keywords.iter().cloned().chain(found) {
        if keywords.len() == config.keyword_count {
            break;
        }
        if !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    let auto_summary = nlp::summarize(page_title, &text, &keywords, config.summary_sentences);
    let title = metadata.title.clone().unwrap_or_else(|| NO_TITLE.to_string());

    let mut images = metadata.images;
    if let Some(candidate) = top {
        images.extend(doc.extract_content_images(&candidate.element));
    }

    tracing::debug!(
        chars = text.chars().count(),
        candidates = candidates.len(),
        top_score = top.map(|c| c.score),
        "structured parse finished"
    );

    Ok(ArticleContent {
        text,
        title: Some(title),
        keywords: Some(keywords),
        auto_summary: Some(auto_summary),
        images: Some(images),
        source_url: base_url.map(Url::to_string),
        method: ExtractionMethod::Structured,
    })
}

/// Scores containers by the paragraphs inside them.
///
/// Each paragraph adds its score to its parent halved and to its
/// grandparent divided by three. A container's own tag and class/id weight
/// are added once, on first sight, and the total is finally scaled by the
/// share of its text that is not link text.
fn score_candidates<'a>(doc: &'a Document, config: &ScoreConfig) -> Result<Vec<Candidate<'a>>, ExtractionError> {
    let mut candidates: Vec<Candidate<'a>> = Vec::new();

    for paragraph in doc.select("p")? {
        let Some(score) = paragraph_score(&paragraph.normalized_text(), config) else {
            continue;
        };

        for (level, ancestor) in paragraph.ancestors().take(2).enumerate() {
            if ancestor.tag_name() == "html" {
                break;
            }

            let share = score / (level as f64 + 2.0);
            match candidates.iter_mut().find(|c| c.element == ancestor) {
                Some(candidate) => candidate.score += share,
                None => candidates.push(Candidate {
                    element: ancestor,
                    score: base_tag_score(&ancestor) + class_id_weight(&ancestor, config) + share,
                }),
            }
        }
    }

    for candidate in &mut candidates {
        candidate.score *= 1.0 - link_density(&candidate.element);
    }

    Ok(candidates)
}

/// Highest score wins; the earlier candidate wins ties.
fn select_top_candidate<'a>(candidates: &[Candidate<'a>]) -> Option<Candidate<'a>> {
    candidates.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if b.score >= candidate.score => Some(b),
        _ => Some(candidate),
    })
}

/// Non-empty paragraph texts of `container`, whitespace-normalized, one
/// blank line apart.
fn paragraph_text(container: &Element<'_>) -> Result<String, ExtractionError> {
    let paragraphs: Vec<String> = container
        .select("p")?
        .iter()
        .map(Element::normalized_text)
        .filter(|text| !text.is_empty())
        .collect();

    Ok(paragraphs.join("\n\n"))
}
