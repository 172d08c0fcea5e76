use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brevis_core::{ExtractionError, SettingsError, SummarizationError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by API handlers as `{"error": "..."}` bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error("{0}")]
    BadRequest(String),

    /// A remote page or model failed.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::warn!(%status, error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::InvalidUrl(_) => Self::BadRequest(err.to_string()),
            _ => Self::Upstream(err.to_string()),
        }
    }
}

impl From<SummarizationError> for ApiError {
    fn from(err: SummarizationError) -> Self {
        match err {
            SummarizationError::InvalidChunkSize => Self::BadRequest(err.to_string()),
            _ => Self::Upstream(err.to_string()),
        }
    }
}
