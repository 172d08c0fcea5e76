//! Per-user interactive state.
//!
//! A [`Session`] holds what one user is working on: the input text, the URL
//! last typed, the last extracted article, the four summary controls and
//! the last summary. Updates are last-write-wins. A failed extraction leaves
//! the text and article exactly as they were.

use serde::{Deserialize, Serialize};

use crate::article::ArticleContent;
use crate::summarize::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, SummaryRequest, SummaryResult};
use crate::{ExtractionError, SettingsError};

/// Allowed `max_length` range.
pub const MAX_LENGTH_RANGE: (u32, u32) = (100, 600);
/// Allowed `min_length` range.
pub const MIN_LENGTH_RANGE: (u32, u32) = (30, 150);
/// Allowed `chunk_size` range, in characters.
pub const CHUNK_SIZE_RANGE: (usize, usize) = (500, 2000);

/// The four user-facing summary controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
    pub chunk_size: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            do_sample: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SummarySettings {
    /// Checks every control against its range.
    ///
    /// The relation between `min_length` and `max_length` is not checked.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_range("max_length", self.max_length as u64, MAX_LENGTH_RANGE.0 as u64, MAX_LENGTH_RANGE.1 as u64)?;
        check_range("min_length", self.min_length as u64, MIN_LENGTH_RANGE.0 as u64, MIN_LENGTH_RANGE.1 as u64)?;
        check_range("chunk_size", self.chunk_size as u64, CHUNK_SIZE_RANGE.0 as u64, CHUNK_SIZE_RANGE.1 as u64)
    }

    /// Builds a request for `text` with these controls.
    pub fn request(&self, text: impl Into<String>) -> SummaryRequest {
        SummaryRequest {
            text: text.into(),
            max_length: self.max_length,
            min_length: self.min_length,
            do_sample: self.do_sample,
            chunk_size: self.chunk_size,
        }
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), SettingsError> {
    if (min..=max).contains(&value) { Ok(()) } else { Err(SettingsError::OutOfRange { field, value, min, max }) }
}

/// One user's working state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Text the next summary runs on.
    pub input_text: String,
    /// URL last submitted for extraction, successful or not.
    pub url: Option<String>,
    /// Result of the last successful extraction.
    pub article: Option<ArticleContent>,
    pub settings: SummarySettings,
    pub last_summary: Option<SummaryResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input text, e.g. after the user pastes an article.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Records the outcome of extracting `url`.
    ///
    /// On success the extracted text becomes the input text. On failure only
    /// the URL field changes; the error is handed back for display.
    pub fn record_extraction(
        &mut self, url: impl Into<String>, result: Result<ArticleContent, ExtractionError>,
    ) -> Result<&ArticleContent, ExtractionError> {
        self.url = Some(url.into());
        let article = result?;
        self.input_text = article.text.clone();
        Ok(self.article.insert(article))
    }

    /// Validates and stores new controls. Invalid settings are not stored.
    pub fn update_settings(&mut self, settings: SummarySettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// A request for the current text with the current controls.
    pub fn summary_request(&self) -> SummaryRequest {
        self.settings.request(self.input_text.clone())
    }

    pub fn record_summary(&mut self, result: SummaryResult) -> &SummaryResult {
        self.last_summary.insert(result)
    }

    /// Character count of the input text.
    pub fn char_count(&self) -> usize {
        self.input_text.chars().count()
    }
}
