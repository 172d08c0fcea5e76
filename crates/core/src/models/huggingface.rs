use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{GenerationParams, SummarizationModel};
use crate::SummarizationError;

/// Hosted BART model fine-tuned on CNN/DailyMail.
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Summarization pipeline served by a Hugging Face inference endpoint.
pub struct HuggingFaceModel {
    client: Client,
    endpoint: Url,
    name: String,
    api_token: Option<String>,
}

impl HuggingFaceModel {
    pub fn new(
        endpoint: &str, api_token: Option<String>, timeout: Option<Duration>,
    ) -> Result<Self, SummarizationError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| SummarizationError::Initialization(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| SummarizationError::Initialization(e.to_string()))?;

        let name = match endpoint.path().split_once("/models/") {
            Some((_, model)) if !model.is_empty() => model.trim_end_matches('/').to_string(),
            _ => endpoint.to_string(),
        };

        Ok(Self { client, endpoint, name, api_token: api_token.filter(|t| !t.is_empty()) })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl SummarizationModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String, SummarizationError> {
        let body = InferenceRequest { inputs: text, parameters: params, options: InferenceOptions { wait_for_model: true } };

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let payload = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&payload).map(|b| b.error).unwrap_or(payload);
            return Err(SummarizationError::Status { status: status.as_u16(), message });
        }

        let outputs: Vec<SummaryOutput> =
            serde_json::from_str(&payload).map_err(|e| SummarizationError::InvalidResponse(e.to_string()))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .ok_or_else(|| SummarizationError::InvalidResponse("empty summary list".to_string()))
    }
}
