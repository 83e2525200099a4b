//! Chat passthrough integration tests

use axum::http::StatusCode;
use filechat_llm::mock::MockOutcome;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
async fn test_chat_returns_model_response() {
    let app = TestApp::with_outcome(MockOutcome::Reply("Hi! How can I help?".to_string()))
        .await
        .unwrap();

    let req = json_request("/chat", json!({"message": "Hello"}));
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        parse_body(resp).await,
        json!({"response": "Hi! How can I help?"})
    );
    assert_eq!(app.llm.recorded_requests()[0].prompt, "Hello");
}

#[tokio::test]
async fn test_chat_with_language_translates() {
    let app = TestApp::with_outcome(MockOutcome::Reply("Bonjour".to_string()))
        .await
        .unwrap();

    let req = json_request(
        "/chat",
        json!({"message": "Hello", "target_language": "French"}),
    );
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(
        parse_body(resp).await,
        json!({"translated_content": "Bonjour"})
    );
    assert_eq!(
        app.llm.recorded_requests()[0].prompt,
        "Translate to French: Hello"
    );
}

#[tokio::test]
async fn test_chat_with_blank_language_is_plain_chat() {
    let app = TestApp::new().await.unwrap();

    let req = json_request("/chat", json!({"message": "Hello", "target_language": ""}));
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["response"], "Mock response to: Hello");
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let app = TestApp::new().await.unwrap();

    for message in ["", "   "] {
        let req = json_request("/chat", json!({ "message": message }));
        let resp = app.test_router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn test_chat_backend_down_is_500() {
    let app = TestApp::with_outcome(MockOutcome::Unavailable).await.unwrap();

    let req = json_request("/chat", json!({"message": "Hello"}));
    let resp = app.test_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "MODEL_ERROR");
}
