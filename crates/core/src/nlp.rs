//! Lightweight keyword and extractive-summary heuristics.
//!
//! Both run on the structured parser's output only. Keywords are the most
//! frequent non-stopword terms of the title and body; the auto-summary is the
//! highest-scoring sentences, reported in their original order.

use std::collections::{HashMap, HashSet};

/// Number of keywords reported for a structured result.
pub const KEYWORD_COUNT: usize = 10;

/// Number of sentences kept in the auto-summary.
pub const SUMMARY_SENTENCES: usize = 5;

/// Sentence length (in words) that scores best.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can", "could", "did", "do",
    "does", "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "he",
    "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "said", "same", "says", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Lowercased alphanumeric word tokens; apostrophes stay inside words.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '’').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

/// Words that count toward keyword frequency.
fn content_words(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| w.chars().count() > 1 && !is_stopword(w) && !w.chars().all(|c| c.is_numeric()))
        .collect()
}

/// The `limit` most frequent content words of `title` and `text`.
///
/// Ties are broken alphabetically so the result is deterministic.
pub fn keywords(title: &str, text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in content_words(title).into_iter().chain(content_words(text)) {
        *counts.entry(word).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// Splits text into sentences at `.`, `!` or `?` followed by whitespace, and
/// at line breaks.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            push_sentence(&mut sentences, &mut current);
            continue;
        }

        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|next| next.is_whitespace()) {
            push_sentence(&mut sentences, &mut current);
        }
    }
    push_sentence(&mut sentences, &mut current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}

/// Picks up to `count` sentences scoring highest on title overlap, keyword
/// density, length and position, joined with newlines in original order.
pub fn summarize(title: &str, text: &str, keywords: &[String], count: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || count == 0 {
        return String::new();
    }

    let title_words: HashSet<String> = content_words(title).into_iter().collect();
    let keyword_set: HashSet<&str> = keywords.iter().map(String::as_str).collect();
    let total = sentences.len();

    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| {
            let tokens = words(sentence);
            let title_score = title_overlap(&tokens, &title_words);
            let keyword_score = keyword_density(&tokens, &keyword_set);
            let length_score = length_score(tokens.len());
            let position_score = position_score(index, total);

            let score = (title_score * 1.5 + keyword_score * 2.0 + length_score * 0.5 + position_score) / 4.0;
            (index, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut picked: Vec<usize> = scored.into_iter().take(count).map(|(index, _)| index).collect();
    picked.sort_unstable();

    picked.into_iter().map(|i| sentences[i].as_str()).collect::<Vec<_>>().join("\n")
}

fn title_overlap(tokens: &[String], title_words: &HashSet<String>) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let shared: HashSet<&String> = tokens.iter().filter(|t| title_words.contains(*t)).collect();
    shared.len() as f64 / title_words.len() as f64
}

fn keyword_density(tokens: &[String], keywords: &HashSet<&str>) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let hits = tokens.iter().filter(|t| keywords.contains(t.as_str())).count();
    hits as f64 / tokens.len() as f64
}

fn length_score(words: usize) -> f64 {
    (1.0 - (words as f64 - IDEAL_SENTENCE_WORDS).abs() / IDEAL_SENTENCE_WORDS).max(0.0)
}

/// Leading sentences of a news story carry the most weight.
fn position_score(index: usize, total: usize) -> f64 {
    let normalized = (index + 1) as f64 / total as f64;
    match normalized {
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n <= 0.6 => 0.04,
        n if n <= 0.7 => 0.06,
        n if n <= 0.8 => 0.04,
        n if n <= 0.9 => 0.04,
        _ => 0.15,
    }
}
