//! Summarization model capability.
//!
//! The summarizer only ever sees a [`SummarizationModel`]: one text in, one
//! summary out, shaped by [`GenerationParams`]. Two implementations ship:
//! [`HuggingFaceModel`] calls a hosted seq2seq model over HTTP, and
//! [`LeadModel`] is an offline extractive stand-in for tests and air-gapped
//! use.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::SummarizationError;

pub mod huggingface;
pub mod lead;

pub use huggingface::HuggingFaceModel;
pub use lead::LeadModel;

/// Generation controls passed through to the model for every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    /// Sample instead of decoding greedily.
    pub do_sample: bool,
    /// Cut inputs that exceed the model's window.
    pub truncation: bool,
}

/// A black-box text summarizer.
#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, SummarizationError>;
}

/// Which model implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    HuggingFace,
    Lead,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "huggingface"),
            Self::Lead => write!(f, "lead"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "lead" => Ok(Self::Lead),
            other => Err(format!("unknown model '{}', expected 'huggingface' or 'lead'", other)),
        }
    }
}

/// Everything needed to build a model.
#[derive(Clone, Default)]
pub struct ModelConfig {
    pub kind: ModelKind,
    /// Inference endpoint; `None` uses [`huggingface::DEFAULT_ENDPOINT`].
    pub endpoint: Option<String>,
    /// Bearer token for the inference endpoint.
    pub api_token: Option<String>,
    /// Per-request timeout for remote models. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ModelConfig {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind, ..Default::default() }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds the model described by `config`.
pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn SummarizationModel>, SummarizationError> {
    match config.kind {
        ModelKind::HuggingFace => {
            let endpoint = config.endpoint.as_deref().unwrap_or(huggingface::DEFAULT_ENDPOINT);
            let model = HuggingFaceModel::new(endpoint, config.api_token.clone(), config.timeout)?;
            Ok(Arc::new(model))
        }
        ModelKind::Lead => Ok(Arc::new(LeadModel)),
    }
}

/// A model built on first use and shared for the life of the process.
///
/// Concurrent first callers wait on the same initialization. A failed
/// initialization is not cached; the next call tries again.
#[derive(Debug)]
pub struct LazyModel {
    config: ModelConfig,
    model: OnceCell<Arc<dyn SummarizationModel>>,
}

impl LazyModel {
    pub fn new(config: ModelConfig) -> Self {
        Self { config, model: OnceCell::new() }
    }

    /// Wraps an already built model.
    pub fn from_model(model: Arc<dyn SummarizationModel>) -> Self {
        Self { config: ModelConfig::default(), model: OnceCell::new_with(Some(model)) }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.model.initialized()
    }

    /// The shared model, building it if this is the first call.
    pub async fn get(&self) -> Result<Arc<dyn SummarizationModel>, SummarizationError> {
        self.model
            .get_or_try_init(|| async {
                tracing::info!(kind = %self.config.kind, "initializing summarization model");
                create_model(&self.config)
            })
            .await
            .cloned()
    }
}
