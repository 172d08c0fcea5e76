//! The extraction fallback chain.
//!
//! [`Extractor::extract`] fetches a page, runs the structured parser and
//! keeps its result when the text is longer than
//! [`ExtractConfig::min_text_length`] characters. Anything shorter, or a
//! structured attempt that errors, sends the request down the fallback path:
//! a fresh fetch through the retrying client and a paragraph scrape.
//!
//! # Example
//!
//! ```rust,no_run
//! use brevis_core::extract::Extractor;
//!
//! # async fn run() -> Result<(), brevis_core::ExtractionError> {
//! let extractor = Extractor::with_defaults()?;
//! let article = extractor.extract("https://example.com/news/story").await?;
//! println!("{} ({} chars)", article.display_title(), article.char_count());
//! # Ok(())
//! # }
//! ```

use url::Url;

use crate::article::ArticleContent;
use crate::fetch::{FetchConfig, Fetcher, parse_url};
use crate::structured::{self, StructuredConfig};
use crate::{ExtractionError, fallback};

/// Configuration for the extraction chain
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Structured text must be strictly longer than this many characters
    pub min_text_length: usize,
    pub fetch: FetchConfig,
    pub structured: StructuredConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { min_text_length: 500, fetch: FetchConfig::default(), structured: StructuredConfig::default() }
    }
}

impl ExtractConfig {
    pub fn min_text_length(mut self, chars: usize) -> Self {
        self.min_text_length = chars;
        self
    }

    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }
}

/// Turns URLs (or HTML already in hand) into [`ArticleContent`].
///
/// Holds one HTTP client for its lifetime; clone it freely.
#[derive(Debug, Clone)]
pub struct Extractor {
    fetcher: Fetcher,
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Result<Self, ExtractionError> {
        let fetcher = Fetcher::new(config.fetch.clone())?;
        Ok(Self { fetcher, config })
    }

    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(ExtractConfig::default())
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Fetches and extracts the article at `url`.
    ///
    /// # Errors
    ///
    /// Fails with [`ExtractionError::InvalidUrl`] before any network access
    /// for malformed or non-http(s) input. Otherwise errors come from the
    /// fallback path only: its fetch (transport failure, timeout, HTTP error
    /// status) or an empty paragraph set ([`ExtractionError::NoContent`]).
    pub async fn extract(&self, url: &str) -> Result<ArticleContent, ExtractionError> {
        let url = parse_url(url)?;
        tracing::info!(%url, "extracting article");

        let structured = match self.fetcher.fetch(&url).await {
            Ok(html) => self.try_structured(&html, Some(&url)),
            Err(e) => {
                tracing::warn!(%url, error = %e, "structured fetch failed");
                None
            }
        };

        if let Some(content) = structured {
            return Ok(content);
        }

        let html = self.fetcher.fetch_with_retries(&url).await?;
        let content = fallback::scrape(&html)?;
        Ok(content.with_source_url(url.as_str()))
    }

    /// Runs the structured parse and fallback scrape on `html` without any
    /// network access. `base_url` resolves relative image URLs.
    pub fn extract_html(&self, html: &str, base_url: Option<&Url>) -> Result<ArticleContent, ExtractionError> {
        if let Some(content) = self.try_structured(html, base_url) {
            return Ok(content);
        }

        let content = fallback::scrape(html)?;
        Ok(match base_url {
            Some(url) => content.with_source_url(url.as_str()),
            None => content,
        })
    }

    /// The structured result when it is long enough, `None` otherwise.
    fn try_structured(&self, html: &str, base_url: Option<&Url>) -> Option<ArticleContent> {
        match structured::parse_with_config(html, base_url, &self.config.structured) {
            Ok(content) if content.char_count() > self.config.min_text_length => Some(content),
            Ok(content) => {
                tracing::info!(
                    chars = content.char_count(),
                    min = self.config.min_text_length,
                    "structured text too short, falling back"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "structured parse failed, falling back");
                None
            }
        }
    }
}
