//! HTTP API tests driven through the router with `oneshot`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use memo_core::error::{MemoError, MemoResult};
use memo_core::traits::{GenerationOptions, Llm, LlmResponse};
use memo_core::{Locale, MemoRepository, Message, SummarizationGateway};
use memo_server::{create_server, AppState};
use memo_stores::SqliteMemoStore;
use serde_json::{json, Value};
use tower::ServiceExt;

/// LLM double that counts calls and answers with a fixed summary.
struct StubLlm {
    reply: Result<String, ()>,
    calls: AtomicUsize,
}

impl StubLlm {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(()),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Llm for StubLlm {
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> MemoResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(LlmResponse::text(text.clone())),
            Err(()) => Err(MemoError::llm("upstream 500: internal detail")),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn app_with(llm: Option<Arc<StubLlm>>, locale: Locale) -> Router {
    let store = SqliteMemoStore::in_memory().unwrap();
    let repository = MemoRepository::new(Arc::new(store), locale);
    let gateway = SummarizationGateway::new(llm.map(|l| l as Arc<dyn Llm>), locale);
    create_server(AppState::new(repository, gateway))
}

fn app() -> Router {
    app_with(None, Locale::En)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str, category: &str, tags: Value) -> Value {
    let (status, memo) = send(
        app,
        "POST",
        "/memos",
        Some(json!({ "title": title, "content": "Visit museum", "category": category, "tags": tags })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    memo
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "sqlite");
    assert_eq!(body["memos"], 0);
    assert_eq!(body["summarization"], false);
}

#[tokio::test]
async fn test_categories_are_localized() {
    let app = app_with(None, Locale::Ko);
    let (status, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[0], json!({ "value": "personal", "label": "개인" }));
}

#[tokio::test]
async fn test_memo_crud_round() {
    let app = app();

    let memo = create(&app, "Trip Plan", "personal", json!(["travel"])).await;
    let id = memo["id"].as_str().unwrap().to_string();
    assert_eq!(memo["tags"], json!(["travel"]));
    assert_eq!(memo["createdAt"], memo["updatedAt"]);

    let (status, fetched) = send(&app, "GET", &format!("/memos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, memo);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/memos/{}", id),
        Some(json!({ "title": "Trip Plan v2", "content": "Visit museum", "category": "idea" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Trip Plan v2");
    assert_eq!(updated["tags"], json!([]));
    assert_eq!(updated["createdAt"], memo["createdAt"]);
    assert_ne!(updated["updatedAt"], memo["updatedAt"]);

    let (status, _) = send(&app, "DELETE", &format!("/memos/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/memos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "MEMO_001");
    assert_eq!(body["error"]["message"], "Memo not found.");

    // Deleting again is not an error.
    let (status, _) = send(&app, "DELETE", &format!("/memos/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/memos/missing",
        Some(json!({ "title": "t", "content": "c", "category": "work" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Failed to update memo.");
}

#[tokio::test]
async fn test_create_missing_title_is_unprocessable() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/memos",
        Some(json!({ "title": "  ", "content": "c", "category": "work" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VAL_002");

    let (_, list) = send(&app, "GET", "/memos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_unreadable_form_uses_error_envelope() {
    let app = app_with(None, Locale::Ko);

    for body in [
        json!({ "content": "c", "category": "work" }),
        json!({ "title": "t", "content": "c", "category": "groceries" }),
    ] {
        let (status, response) = send(&app, "POST", "/memos", Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["error"]["code"], "VAL_001");
        assert_eq!(response["error"]["message"], "입력값이 올바르지 않습니다.");

        let (status, response) = send(&app, "PUT", "/memos/some-id", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["error"]["code"], "VAL_001");
    }

    let (_, list) = send(&app, "GET", "/memos", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_unreadable_query_and_search_use_error_envelope() {
    let app = app();

    let (status, body) = send(&app, "GET", "/memos?category=groceries", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VAL_001");
    assert_eq!(body["error"]["message"], "Invalid input.");

    let (status, body) = send(&app, "POST", "/search", Some(json!({ "query": 7 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VAL_001");
}

#[tokio::test]
async fn test_list_by_category_and_clear_all() {
    let app = app();
    create(&app, "Trip Plan", "personal", json!(["travel"])).await;
    let standup = create(&app, "Standup", "work", json!([])).await;

    let (status, work) = send(&app, "GET", "/memos?category=work", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(work, json!([standup]));

    let (_, all) = send(&app, "GET", "/memos", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["title"], "Standup");

    let (status, _) = send(&app, "DELETE", "/memos", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, all) = send(&app, "GET", "/memos", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_search_finds_tag_only_match() {
    let app = app();
    let trip = create(&app, "Trip Plan", "personal", json!(["travel"])).await;
    create(&app, "Standup", "work", json!([])).await;

    let (status, hits) = send(&app, "POST", "/search", Some(json!({ "query": "travel" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits, json!([trip]));

    let (_, everything) = send(&app, "POST", "/search", Some(json!({ "query": "" }))).await;
    let (_, list) = send(&app, "GET", "/memos", None).await;
    assert_eq!(everything, list);
}

#[tokio::test]
async fn test_summarize_success() {
    let llm = StubLlm::replying("Summary X");
    let app = app_with(Some(llm.clone()), Locale::Ko);

    let (status, body) = send(
        &app,
        "POST",
        "/api/summarize",
        Some(json!({ "content": "A long memo body" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "Summary X" }));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summarize_content_required_makes_no_call() {
    let llm = StubLlm::replying("unused");
    let app = app_with(Some(llm.clone()), Locale::Ko);

    for body in [json!({ "content": "" }), json!({}), json!({ "content": 42 })] {
        let (status, response) = send(&app, "POST", "/api/summarize", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({ "error": "content required" }));
    }
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_summarize_missing_credential() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/summarize",
        Some(json!({ "content": "memo" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "missing credential" }));
}

#[tokio::test]
async fn test_summarize_upstream_failure_is_generic() {
    let llm = StubLlm::failing();
    let app = app_with(Some(llm), Locale::En);
    let (status, body) = send(
        &app,
        "POST",
        "/api/summarize",
        Some(json!({ "content": "memo" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "summarization failed" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}
