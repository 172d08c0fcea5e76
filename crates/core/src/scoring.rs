//! Heuristic scores used by the structured parser to find the article body.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Positive patterns that suggest an element contains main content
static POSITIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)")
        .expect("positive pattern")
});

/// Negative patterns that suggest an element does NOT contain main content
static NEGATIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|promo|share|widget)",
    )
    .expect("negative pattern")
});

/// Weights for the scoring pass
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Paragraphs shorter than this (in characters) are ignored
    pub min_paragraph_length: usize,
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Characters per point of length bonus
    pub chars_per_point: usize,
    /// Cap on the length bonus
    pub max_length_bonus: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            min_paragraph_length: 25,
            positive_weight: 25.0,
            negative_weight: -25.0,
            chars_per_point: 100,
            max_length_bonus: 3.0,
        }
    }
}

/// Initial score of a container based on its tag
///
/// - ARTICLE: +10, SECTION/MAIN: +8, DIV: +5
/// - TD, BLOCKQUOTE: +3
/// - FORM, lists: -3
/// - headings, TH, HEADER, FOOTER, NAV: -5
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "section" | "main" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "pre" => 0.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight: positive patterns win over negative ones, id before class.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let names = element
        .attr("id")
        .into_iter()
        .chain(element.attr("class").into_iter().flat_map(str::split_whitespace));

    for name in names {
        if POSITIVE_PATTERNS.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE_PATTERNS.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Contribution of one paragraph to its ancestors, `None` for paragraphs
/// too short to count.
///
/// One point for existing, one per comma, plus a length bonus.
pub fn paragraph_score(text: &str, config: &ScoreConfig) -> Option<f64> {
    let length = text.chars().count();
    if length < config.min_paragraph_length {
        return None;
    }

    let commas = text.matches(',').count() as f64;
    let length_bonus = ((length / config.chars_per_point) as f64).min(config.max_length_bonus);

    Some(1.0 + commas + length_bonus)
}

/// Ratio of link text characters to total text characters, 0.0 to 1.0.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum();

    link_length as f64 / text_length as f64
}
