//! Chunked summarization.
//!
//! Long text is cut into fixed-size character chunks (see [`crate::chunk`]),
//! each chunk is summarized on its own, one after another, and the chunk
//! summaries are joined with single spaces.
//!
//! # Example
//!
//! ```rust
//! use brevis_core::models::LeadModel;
//! use brevis_core::summarize::{SummaryRequest, summarize};
//!
//! # tokio_test_block(async {
//! let request = SummaryRequest::new("First sentence. Second sentence.").chunk_size(1024);
//! let result = summarize(&LeadModel, &request).await.unwrap();
//! assert_eq!(result.chunk_summaries.len(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::SummarizationError;
use crate::chunk::{chunk_count, chunk_text};
use crate::models::{GenerationParams, SummarizationModel};

pub const DEFAULT_MAX_LENGTH: u32 = 300;
pub const DEFAULT_MIN_LENGTH: u32 = 50;
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// One summarization call's input.
///
/// `min_length < max_length` is not checked here; the pair is handed to the
/// model as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
    /// Chunk size in characters; must be non-zero.
    pub chunk_size: usize,
}

impl SummaryRequest {
    /// A request for `text` with default controls.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            do_sample: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn max_length(mut self, value: u32) -> Self {
        self.max_length = value;
        self
    }

    pub fn min_length(mut self, value: u32) -> Self {
        self.min_length = value;
        self
    }

    pub fn do_sample(mut self, value: bool) -> Self {
        self.do_sample = value;
        self
    }

    pub fn chunk_size(mut self, value: usize) -> Self {
        self.chunk_size = value;
        self
    }

    /// Parameters sent with every chunk. Truncation is always on.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.max_length,
            min_length: self.min_length,
            do_sample: self.do_sample,
            truncation: true,
        }
    }
}

/// Per-chunk summaries and their single-space join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub chunk_summaries: Vec<String>,
    pub full_summary: String,
    /// Name of the model that produced the summaries.
    pub model: String,
}

impl SummaryResult {
    pub fn new(chunk_summaries: Vec<String>, model: impl Into<String>) -> Self {
        let full_summary = chunk_summaries.join(" ");
        Self { chunk_summaries, full_summary, model: model.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.chunk_summaries.is_empty()
    }
}

/// Summarizes `request.text` chunk by chunk with `model`.
///
/// Empty text produces an empty result without calling the model.
///
/// # Errors
///
/// [`SummarizationError::InvalidChunkSize`] for a zero chunk size, or
/// [`SummarizationError::Chunk`] wrapping the first model failure. Summaries
/// of earlier chunks are discarded on failure.
pub async fn summarize<M>(model: &M, request: &SummaryRequest) -> Result<SummaryResult, SummarizationError>
where
    M: SummarizationModel + ?Sized,
{
    let total = chunk_count(&request.text, request.chunk_size)?;
    let params = request.generation_params();
    let mut summaries = Vec::with_capacity(total);

    tracing::info!(model = model.name(), chunks = total, chunk_size = request.chunk_size, "summarizing");

    for (i, chunk) in chunk_text(&request.text, request.chunk_size)?.enumerate() {
        let index = i + 1;
        tracing::debug!(index, total, chars = chunk.chars().count(), "summarizing chunk");

        let summary = model
            .summarize(chunk, &params)
            .await
            .map_err(|e| SummarizationError::Chunk { index, total, source: Box::new(e) })?;
        summaries.push(summary);
    }

    Ok(SummaryResult::new(summaries, model.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and answers `s1`, `s2`, ... or fails on one chunk.
    #[derive(Debug, Default)]
    struct ScriptedModel {
        calls: Mutex<Vec<(String, GenerationParams)>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl SummarizationModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, SummarizationError> {
            let mut calls = self.calls.lock().unwrap();
            calls.push((text.to_string(), *params));
            let n = calls.len();
            if self.fail_on == Some(n) {
                return Err(SummarizationError::Model { model: "scripted".to_string(), message: "boom".to_string() });
            }
            Ok(format!("s{}", n))
        }
    }

    #[tokio::test]
    async fn test_two_chunks_joined_with_space() {
        let model = ScriptedModel::default();
        let text = "a".repeat(2048);
        let result = summarize(&model, &SummaryRequest::new(text).chunk_size(1024)).await.unwrap();

        assert_eq!(result.chunk_summaries, vec!["s1", "s2"]);
        assert_eq!(result.full_summary, "s1 s2");
        assert_eq!(result.model, "scripted");

        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(chunk, _)| chunk.chars().count() == 1024));
    }

    #[tokio::test]
    async fn test_params_forwarded_unchanged() {
        let model = ScriptedModel::default();
        let request = SummaryRequest::new("text").max_length(100).min_length(150).do_sample(true);
        summarize(&model, &request).await.unwrap();

        let calls = model.calls.lock().unwrap();
        assert_eq!(
            calls[0].1,
            GenerationParams { max_length: 100, min_length: 150, do_sample: true, truncation: true }
        );
    }

    #[tokio::test]
    async fn test_empty_text_makes_no_calls() {
        let model = ScriptedModel::default();
        let result = summarize(&model, &SummaryRequest::new("")).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(result.full_summary, "");
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chunk_larger_than_text() {
        let model = ScriptedModel::default();
        let result = summarize(&model, &SummaryRequest::new("short").chunk_size(2000)).await.unwrap();

        assert_eq!(result.chunk_summaries.len(), 1);
        assert_eq!(model.calls.lock().unwrap()[0].0, "short");
    }

    #[tokio::test]
    async fn test_zero_chunk_size() {
        let model = ScriptedModel::default();
        let err = summarize(&model, &SummaryRequest::new("text").chunk_size(0)).await.unwrap_err();

        assert!(matches!(err, SummarizationError::InvalidChunkSize));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chunk_failure_aborts() {
        let model = ScriptedModel { fail_on: Some(2), ..Default::default() };
        let text = "b".repeat(30);
        let err = summarize(&model, &SummaryRequest::new(text).chunk_size(10)).await.unwrap_err();

        match err {
            SummarizationError::Chunk { index, total, source } => {
                assert_eq!(index, 2);
                assert_eq!(total, 3);
                assert!(matches!(*source, SummarizationError::Model { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(model.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_works_with_trait_objects() {
        let model: std::sync::Arc<dyn SummarizationModel> = std::sync::Arc::new(crate::models::LeadModel);
        let result = summarize(model.as_ref(), &SummaryRequest::new("Only sentence.")).await.unwrap();
        assert_eq!(result.full_summary, "Only sentence.");
    }
}
