//! Library API integration tests
use brevis_core::models::LeadModel;
use brevis_core::*;

fn get_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn quick_extractor() -> Extractor {
    let fetch = FetchConfig::default().timeout(5).retry_backoff(std::time::Duration::from_millis(1));
    Extractor::new(ExtractConfig::default().fetch(fetch)).unwrap()
}

#[tokio::test]
async fn test_extract_structured_article() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/2024/flood-barrier")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(get_fixture("long_article.html"))
        .expect(1)
        .create_async()
        .await;

    let url = format!("{}/2024/flood-barrier", server.url());
    let article = quick_extractor().extract(&url).await.expect("should extract");

    assert_eq!(article.method, ExtractionMethod::Structured);
    assert!(article.char_count() > 500);
    assert!(article.text.starts_with("The harbour city switched on"));
    assert!(!article.text.contains("Ferry timetable"));
    assert!(!article.text.contains("Copyright"));

    assert_eq!(article.title.as_deref(), Some("Harbour city opens its new tidal flood barrier"));
    let keywords = article.keywords.as_ref().unwrap();
    assert_eq!(keywords[0], "flood barrier");
    assert!(keywords.contains(&"barrier".to_string()));
    assert!(!article.auto_summary.as_ref().unwrap().is_empty());

    let images = article.images.as_ref().unwrap();
    assert!(images.contains(&format!("{}/media/barrier-lead.jpg", server.url())));
    assert!(images.contains(&format!("{}/media/gates-raised.jpg", server.url())));
    assert!(images.contains("https://cdn.coastal-ledger.example/cards/barrier.png"));

    assert_eq!(article.source_url.as_deref(), Some(url.as_str()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_short_article_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/short")
        .with_status(200)
        .with_body(get_fixture("short_article.html"))
        .expect(2)
        .create_async()
        .await;

    let url = format!("{}/short", server.url());
    let article = quick_extractor().extract(&url).await.expect("should extract");

    assert_eq!(article.method, ExtractionMethod::Fallback);
    assert_eq!(
        article.text,
        "The council meeting has moved to Friday.\n\
         It will start at 7pm in the main hall.\n\
         Residents may submit questions in advance.\n\
         The agenda will be published on Wednesday.\n\
         Parking will be free after 6pm."
    );
    assert_eq!(article.title.as_deref(), Some("Council meeting moved"));
    assert!(article.keywords.is_none());
    assert!(article.auto_summary.is_none());
    assert!(article.images.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_not_found() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("GET", "/missing").with_status(404).expect(2).create_async().await;

    let url = format!("{}/missing", server.url());
    let result = quick_extractor().extract(&url).await;

    assert!(matches!(result, Err(ExtractionError::Status { status: 404, .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_extract_page_without_paragraphs() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/gallery").with_body(get_fixture("no_paragraphs.html")).create_async().await;

    let url = format!("{}/gallery", server.url());
    let result = quick_extractor().extract(&url).await;

    assert!(matches!(result, Err(ExtractionError::NoContent)));
}

#[test]
fn test_extract_html_main_container() {
    let article = quick_extractor().extract_html(&get_fixture("main_only.html"), None).unwrap();

    assert_eq!(article.method, ExtractionMethod::Fallback);
    assert_eq!(article.text, "Road works on the bridge finish next week.\nDiversions remain in place until then.");
    assert_eq!(article.title.as_deref(), Some("No Title Found"));
}

#[tokio::test]
async fn test_session_keeps_content_after_failed_extraction() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/ok").with_body(get_fixture("short_article.html")).create_async().await;
    server.mock("GET", "/missing").with_status(404).create_async().await;

    let extractor = quick_extractor();
    let mut session = Session::new();

    let ok_url = format!("{}/ok", server.url());
    let result = extractor.extract(&ok_url).await;
    session.record_extraction(&ok_url, result).unwrap();
    let before = session.input_text.clone();

    let missing_url = format!("{}/missing", server.url());
    let result = extractor.extract(&missing_url).await;
    assert!(session.record_extraction(&missing_url, result).is_err());

    assert_eq!(session.input_text, before);
    assert_eq!(session.article.as_ref().unwrap().source_url.as_deref(), Some(ok_url.as_str()));
}

#[tokio::test]
async fn test_extract_then_summarize() {
    let article = quick_extractor().extract_html(&get_fixture("long_article.html"), None).unwrap();
    let request = SummaryRequest::new(article.text.clone()).chunk_size(500).max_length(100).min_length(30);

    let result = summarize(&LeadModel, &request).await.unwrap();

    assert_eq!(result.chunk_summaries.len(), article.char_count().div_ceil(500));
    assert_eq!(result.full_summary, result.chunk_summaries.join(" "));
    assert_eq!(result.model, "lead");
}

#[tokio::test]
async fn test_lazy_model_through_summarize() {
    let lazy = LazyModel::new(ModelConfig::new(ModelKind::Lead));
    let model = lazy.get().await.unwrap();
    let text = get_fixture("article.txt");

    let result = summarize(model.as_ref(), &SummarySettings::default().request(text)).await.unwrap();
    assert_eq!(result.chunk_summaries.len(), 1);
    assert!(result.full_summary.starts_with("The harbour city switched on"));
}
