//! Page fetching with a browser-like request identity.
//!
//! News sites routinely reject obvious bots, so every request carries the
//! header set a desktop browser would send. [`Fetcher::fetch`] issues a single
//! attempt; [`Fetcher::fetch_with_retries`] retries transport failures (never
//! HTTP error statuses) up to [`FetchConfig::max_retries`] times.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderName, HeaderValue, REFERER};
use url::Url;

use crate::ExtractionError;

/// HTTP client configuration for fetching article pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent string.
    pub user_agent: String,
    /// Accept header.
    pub accept: String,
    /// Accept-Language header.
    pub accept_language: String,
    /// Referer header.
    pub referer: String,
    /// Retries after the first attempt on the retrying path.
    pub max_retries: u32,
    /// Delay before retry `n` is `retry_backoff * n`.
    pub retry_backoff: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            referer: "https://www.google.com/".to_string(),
            max_retries: 3,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

impl FetchConfig {
    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.user_agent = value.into();
        self
    }

    /// Sets the number of retries used by [`Fetcher::fetch_with_retries`].
    pub fn max_retries(mut self, value: u32) -> Self {
        self.max_retries = value;
        self
    }

    /// Sets the linear retry backoff step.
    pub fn retry_backoff(mut self, value: Duration) -> Self {
        self.retry_backoff = value;
        self
    }

    fn default_headers(&self) -> Result<HeaderMap, ExtractionError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, header_value(&self.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&self.accept_language)?);
        headers.insert(REFERER, header_value(&self.referer)?);
        headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ExtractionError> {
    HeaderValue::from_str(value).map_err(|e| ExtractionError::InvalidUrl(format!("invalid header value: {}", e)))
}

/// Parses and validates a user-supplied article URL.
///
/// Only `http` and `https` are accepted.
pub fn parse_url(url: &str) -> Result<Url, ExtractionError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ExtractionError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ExtractionError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http:// or https://",
            other
        ))),
    }
}

/// A reusable HTTP client carrying the browser-like request identity.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds the underlying client from `config`.
    pub fn new(config: FetchConfig) -> Result<Self, ExtractionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .default_headers(config.default_headers()?)
            .build()
            .map_err(ExtractionError::Http)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches `url` once and returns the decoded body.
    ///
    /// Non-success statuses become [`ExtractionError::Status`].
    pub async fn fetch(&self, url: &Url) -> Result<String, ExtractionError> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Status { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|e| self.map_transport(e))
    }

    /// Fetches `url`, retrying transport failures up to `max_retries` times.
    pub async fn fetch_with_retries(&self, url: &Url) -> Result<String, ExtractionError> {
        let mut attempt = 0u32;

        loop {
            match self.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * attempt;
                    tracing::debug!(%url, attempt, max = self.config.max_retries, error = %e, "retrying fetch");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn map_transport(&self, e: reqwest::Error) -> ExtractionError {
        if e.is_timeout() { ExtractionError::Timeout { timeout: self.config.timeout } } else { ExtractionError::Http(e) }
    }
}

/// Connection-level failures are retried; answers from the server are not.
fn is_retryable(error: &ExtractionError) -> bool {
    match error {
        ExtractionError::Timeout { .. } => true,
        ExtractionError::Http(e) => e.is_connect() || e.is_request() || e.is_body(),
        _ => false,
    }
}
