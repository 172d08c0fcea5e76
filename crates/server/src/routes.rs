use axum::extract::{Path, State};
use axum::response::Html;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use brevis_core::{Session, SummaryResult, SummarySettings, summarize};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/text", put(set_text))
        .route("/api/sessions/{id}/extract", post(extract))
        .route("/api/sessions/{id}/settings", put(update_settings))
        .route("/api/sessions/{id}/summarize", post(summarize_session))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A session as the page sees it.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub char_count: usize,
    #[serde(flatten)]
    pub session: Session,
}

impl SessionView {
    fn new(id: Uuid, session: Session) -> Self {
        Self { id, char_count: session.char_count(), session }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractBody {
    pub url: String,
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.session_count().await,
        "model_loaded": state.model.is_initialized(),
    }))
}

async fn create_session(State(state): State<AppState>) -> Json<SessionView> {
    let (id, session) = state.create_session().await;
    Json(SessionView::new(id, session))
}

async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<SessionView>, ApiError> {
    let session = state.session(id).await?;
    Ok(Json(SessionView::new(id, session)))
}

async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    state.remove_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_text(
    State(state): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<TextBody>,
) -> Result<Json<SessionView>, ApiError> {
    let ((), session) = state.update(id, |s| s.set_text(body.text)).await?;
    Ok(Json(SessionView::new(id, session)))
}

/// Extracts `url` into the session. On failure the error is returned as a
/// 502 and the session keeps its previous text and article.
async fn extract(
    State(state): State<AppState>, Path(id): Path<Uuid>, Json(body): Json<ExtractBody>,
) -> Result<Json<SessionView>, ApiError> {
    state.session(id).await?;

    let url = body.url.trim().to_string();
    let result = state.extractor.extract(&url).await;

    let (recorded, session) = state.update(id, |s| s.record_extraction(url, result).map(|_| ())).await?;
    recorded?;

    Ok(Json(SessionView::new(id, session)))
}

async fn update_settings(
    State(state): State<AppState>, Path(id): Path<Uuid>, Json(settings): Json<SummarySettings>,
) -> Result<Json<SessionView>, ApiError> {
    let (updated, session) = state.update(id, |s| s.update_settings(settings)).await?;
    updated?;
    Ok(Json(SessionView::new(id, session)))
}

async fn summarize_session(
    State(state): State<AppState>, Path(id): Path<Uuid>,
) -> Result<Json<SummaryResult>, ApiError> {
    let request = state.session(id).await?.summary_request();
    let model = state.model.get().await?;

    tracing::info!(%id, chars = request.text.chars().count(), "summary requested");
    let result = summarize(model.as_ref(), &request).await?;

    let (summary, _) = state.update(id, |s| s.record_summary(result).clone()).await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request};
    use brevis_core::models::LeadModel;
    use brevis_core::{ExtractConfig, Extractor, FetchConfig, LazyModel};
    use tower::ServiceExt;

    use super::*;

    fn get_fixture(name: &str) -> String {
        std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
    }

    fn test_app() -> Router {
        let fetch = FetchConfig::default().timeout(5).retry_backoff(Duration::from_millis(1));
        let extractor = Extractor::new(ExtractConfig::default().fetch(fetch)).unwrap();
        router(AppState::new(extractor, LazyModel::from_model(Arc::new(LeadModel))))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = send(app, empty_request(Method::POST, "/api/sessions")).await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = test_app().oneshot(empty_request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<title>Brevis</title>"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        new_session(&app).await;

        let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 1);
    }

    #[tokio::test]
    async fn test_new_session_defaults() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, body) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{}", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input_text"], "");
        assert_eq!(body["char_count"], 0);
        assert_eq!(body["settings"]["max_length"], 300);
        assert_eq!(body["settings"]["min_length"], 50);
        assert_eq!(body["settings"]["do_sample"], false);
        assert_eq!(body["settings"]["chunk_size"], 1024);
        assert!(body["last_summary"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let app = test_app();
        let uri = format!("/api/sessions/{}", Uuid::new_v4());

        let (status, body) = send(&app, empty_request(Method::GET, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_settings_validation() {
        let app = test_app();
        let id = new_session(&app).await;
        let uri = format!("/api/sessions/{}/settings", id);

        let bad = json!({ "max_length": 300, "min_length": 50, "do_sample": false, "chunk_size": 100 });
        let (status, body) = send(&app, json_request(Method::PUT, &uri, bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "chunk_size must be between 500 and 2000, got 100");

        let good = json!({ "max_length": 120, "min_length": 40, "do_sample": true, "chunk_size": 500 });
        let (status, body) = send(&app, json_request(Method::PUT, &uri, good)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settings"]["max_length"], 120);
        assert_eq!(body["settings"]["chunk_size"], 500);
        assert_eq!(body["settings"]["do_sample"], true);
    }

    #[tokio::test]
    async fn test_text_then_summarize() {
        let app = test_app();
        let id = new_session(&app).await;
        let text = get_fixture("article.txt");

        let (status, body) =
            send(&app, json_request(Method::PUT, &format!("/api/sessions/{}/text", id), json!({ "text": text }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["char_count"], text.chars().count());

        let (status, summary) =
            send(&app, empty_request(Method::POST, &format!("/api/sessions/{}/summarize", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["model"], "lead");
        assert_eq!(summary["chunk_summaries"].as_array().unwrap().len(), 1);
        assert!(summary["full_summary"].as_str().unwrap().starts_with("The harbour city switched on"));

        let (_, session) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{}", id))).await;
        assert_eq!(session["last_summary"], summary);
    }

    #[tokio::test]
    async fn test_summarize_empty_text() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, summary) =
            send(&app, empty_request(Method::POST, &format!("/api/sessions/{}/summarize", id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["full_summary"], "");
        assert!(summary["chunk_summaries"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_into_session() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/council").with_body(get_fixture("short_article.html")).create_async().await;

        let app = test_app();
        let id = new_session(&app).await;
        let url = format!("{}/council", server.url());

        let (status, body) =
            send(&app, json_request(Method::POST, &format!("/api/sessions/{}/extract", id), json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], url.as_str());
        assert_eq!(body["article"]["method"], "fallback");
        assert_eq!(body["article"]["title"], "Council meeting moved");
        assert!(body["input_text"].as_str().unwrap().starts_with("The council meeting has moved to Friday.\n"));
    }

    #[tokio::test]
    async fn test_failed_extract_keeps_text() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/missing").with_status(404).create_async().await;

        let app = test_app();
        let id = new_session(&app).await;
        send(&app, json_request(Method::PUT, &format!("/api/sessions/{}/text", id), json!({ "text": "Kept." }))).await;

        let url = format!("{}/missing", server.url());
        let (status, body) =
            send(&app, json_request(Method::POST, &format!("/api/sessions/{}/extract", id), json!({ "url": url }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("404"));

        let (_, session) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{}", id))).await;
        assert_eq!(session["input_text"], "Kept.");
        assert!(session["article"].is_null());
        assert_eq!(session["url"], url.as_str());
    }

    #[tokio::test]
    async fn test_extract_invalid_url() {
        let app = test_app();
        let id = new_session(&app).await;

        let (status, body) = send(
            &app,
            json_request(Method::POST, &format!("/api/sessions/{}/extract", id), json!({ "url": "not a url" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid URL"));
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = test_app();
        let id = new_session(&app).await;
        let uri = format!("/api/sessions/{}", id);

        let (status, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, empty_request(Method::GET, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));

        let (_, health) = send(&app, empty_request(Method::GET, "/health")).await;
        assert_eq!(health["sessions"], 0);
    }

    #[tokio::test]
    async fn test_oldest_session_evicted_when_full() {
        let fetch = FetchConfig::default().timeout(5);
        let extractor = Extractor::new(ExtractConfig::default().fetch(fetch)).unwrap();
        let state = AppState::new(extractor, LazyModel::from_model(Arc::new(LeadModel)))
            .with_session_limits(Duration::from_secs(60), 1);
        let app = router(state);

        let first = new_session(&app).await;
        let second = new_session(&app).await;

        let (status, _) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{}", first))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, empty_request(Method::GET, &format!("/api/sessions/{}", second))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
