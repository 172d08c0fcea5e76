use async_trait::async_trait;

use super::{GenerationParams, SummarizationModel};
use crate::SummarizationError;
use crate::nlp::split_sentences;

/// Offline extractive model: the opening sentences of the text.
///
/// Lengths are counted in words. Whole sentences are taken while they fit
/// in `max_length`; if that leaves fewer than `min_length` words, the next
/// sentence is cut at the `max_length` budget. `do_sample` is ignored, so
/// output is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadModel;

#[async_trait]
impl SummarizationModel for LeadModel {
    fn name(&self) -> &str {
        "lead"
    }

    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, SummarizationError> {
        if params.max_length == 0 {
            return Err(SummarizationError::Model {
                model: self.name().to_string(),
                message: "max_length must be at least 1".to_string(),
            });
        }

        Ok(lead(text, params.max_length as usize, params.min_length as usize))
    }
}

fn lead(text: &str, max_words: usize, min_words: usize) -> String {
    let sentences = split_sentences(text);
    let mut picked: Vec<&str> = Vec::new();

    for sentence in &sentences {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        let room = max_words - picked.len();

        if words.len() <= room {
            picked.extend(words);
            continue;
        }

        if picked.len() < min_words {
            picked.extend(&words[..room]);
        }
        break;
    }

    picked.join(" ")
}
