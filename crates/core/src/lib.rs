//! Article extraction and chunked summarization.
//!
//! Two stages, usable separately:
//!
//! - [`extract::Extractor`] turns a URL into [`ArticleContent`]: a structured
//!   parse first, a blunt paragraph scrape when that comes up short.
//! - [`summarize::summarize`] cuts text into fixed-size character chunks,
//!   summarizes each through a [`models::SummarizationModel`] and joins the
//!   results.
//!
//! [`session::Session`] ties the two together for interactive front ends.

pub mod article;
pub mod chunk;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod models;
pub mod nlp;
pub mod parse;
pub mod preprocess;
pub mod scoring;
pub mod session;
pub mod structured;
pub mod summarize;

pub use article::{ArticleContent, ExtractionMethod};
pub use error::{BrevisError, ExtractionError, Result, SettingsError, SummarizationError};
pub use extract::{ExtractConfig, Extractor};
pub use fetch::FetchConfig;
pub use formatters::{OutputFormat, SummaryView, render_article, render_summary};
pub use models::{GenerationParams, LazyModel, ModelConfig, ModelKind, SummarizationModel, create_model};
pub use parse::Document;
pub use session::{Session, SummarySettings};
pub use summarize::{SummaryRequest, SummaryResult, summarize};
