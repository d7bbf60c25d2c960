//! Generator Client Tests
//!
//! The HTTP chat-completions client against a mock server.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::engine::traits::TextGenerator;
use crate::engine::HttpTextGenerator;
use crate::error::AppError;
use crate::models::ChatMessage;

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_complete_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello from the mock")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = HttpTextGenerator::new(&server.uri(), "test-key", "test-model");
    let reply = generator
        .complete("system prompt", &[ChatMessage::user("hi")], "hello")
        .await
        .unwrap();

    assert_eq!(reply, "Hello from the mock");
}

#[tokio::test]
async fn test_history_is_sent_with_alternating_roles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "messages": [
                { "role": "system", "content": "system prompt" },
                { "role": "user", "content": "first question" },
                { "role": "assistant", "content": "first answer" },
                { "role": "user", "content": "second question" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let generator = HttpTextGenerator::new(&server.uri(), "test-key", "test-model");
    let history = vec![
        ChatMessage::user("first question"),
        ChatMessage::bot("first answer"),
    ];
    let reply = generator
        .complete("system prompt", &history, "second question")
        .await
        .unwrap();

    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn test_error_status_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let generator = HttpTextGenerator::new(&server.uri(), "test-key", "test-model");
    let result = generator.complete("system", &[], "hello").await;

    assert!(matches!(result, Err(AppError::Upstream(_))));
}

#[tokio::test]
async fn test_missing_choices_degrade_to_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let generator = HttpTextGenerator::new(&server.uri(), "test-key", "test-model");
    let reply = generator.complete("system", &[], "hello").await.unwrap();

    assert_eq!(reply, "");
}
