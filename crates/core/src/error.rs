//! Error types for Brevis operations.
//!
//! Extraction and summarization fail independently and are surfaced to the
//! user separately, so each has its own enum: [`ExtractionError`] and
//! [`SummarizationError`]. [`SettingsError`] covers out-of-range control
//! values. [`BrevisError`] wraps all three for callers that want a single type.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::{ExtractionError, fallback};
//!
//! match fallback::scrape("<html><body><div>no paragraphs</div></body></html>") {
//!     Ok(content) => println!("{}", content.text),
//!     Err(ExtractionError::NoContent) => println!("nothing to read"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Errors raised while turning a URL (or raw HTML) into article text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    ///
    /// Wraps connection failures, DNS errors, TLS problems and body decoding
    /// errors.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// No content could be extracted from the document.
    ///
    /// Returned when neither the structured parser nor the paragraph scraper
    /// found any text.
    #[error("No content could be extracted from the document")]
    NoContent,
}

/// Errors raised by the chunked summarizer and the model capability behind it.
#[derive(Error, Debug)]
pub enum SummarizationError {
    /// Chunk size must be at least one character.
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    /// The model rejected or failed to process its input.
    #[error("{model} failed: {message}")]
    Model { model: String, message: String },

    /// Transport failure talking to a remote model.
    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote model answered with a non-success status.
    #[error("Model endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Remote model answered with a body we could not interpret.
    #[error("Unexpected model response: {0}")]
    InvalidResponse(String),

    /// The model could not be created.
    #[error("Failed to initialize summarization model: {0}")]
    Initialization(String),

    /// One chunk failed, which aborts the whole summary.
    #[error("Chunk {index} of {total} failed: {source}")]
    Chunk {
        index: usize,
        total: usize,
        #[source]
        source: Box<SummarizationError>,
    },
}

/// A summary control value outside its allowed range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange { field: &'static str, value: u64, min: u64, max: u64 },
}

/// Umbrella error for callers that drive both pipeline stages.
#[derive(Error, Debug)]
pub enum BrevisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Summarization(#[from] SummarizationError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type alias for BrevisError.
pub type Result<T> = std::result::Result<T, BrevisError>;
