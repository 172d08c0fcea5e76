use std::net::SocketAddr;
use std::time::Duration;

use brevis_core::{FetchConfig, ModelConfig, ModelKind};
use clap::Parser;

/// Web front end for extracting and summarizing news articles
#[derive(Parser, Clone)]
#[command(name = "brevis-server")]
#[command(version)]
#[command(about = "Serve the Brevis summarizer over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "BREVIS_ADDR", default_value = "127.0.0.1:3000", value_name = "ADDR")]
    pub addr: SocketAddr,

    /// Summarization model (huggingface, lead)
    #[arg(long, env = "BREVIS_MODEL", default_value = "huggingface", value_name = "MODEL")]
    pub model: ModelKind,

    /// Inference endpoint for the huggingface model
    #[arg(long, env = "BREVIS_MODEL_ENDPOINT", value_name = "URL")]
    pub model_endpoint: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    pub api_token: Option<String>,

    /// HTTP timeout for article fetches, in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub fetch_timeout: u64,

    /// Drop sessions idle for this many seconds
    #[arg(long, env = "BREVIS_SESSION_TTL", default_value = "3600", value_name = "SECS")]
    pub session_ttl: u64,

    /// Maximum number of live sessions
    #[arg(long, env = "BREVIS_MAX_SESSIONS", default_value = "1000", value_name = "N")]
    pub max_sessions: usize,
}

impl ServerConfig {
    pub fn model_config(&self) -> ModelConfig {
        let mut config = ModelConfig::new(self.model);
        if let Some(endpoint) = &self.model_endpoint {
            config = config.endpoint(endpoint.clone());
        }
        if let Some(token) = &self.api_token {
            config = config.api_token(token.clone());
        }
        config
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default().timeout(self.fetch_timeout)
    }
}
