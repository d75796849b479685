use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};

use docqa::application::ports::{LlmClient, LlmClientError};
use docqa::infrastructure::llm::ChatCompletionClient;
use docqa::presentation::config::LlmSettings;

use crate::helpers::spawn_server;

const API_KEY: &str = "gsk_test";

fn completion(content: Value) -> Json<Value> {
    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

/// Answers with the user message it received, after checking auth and roles.
async fn echo_user_message(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {API_KEY}").as_str());
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    let roles: Vec<&str> = messages.iter().filter_map(|m| m["role"].as_str()).collect();
    if roles != ["system", "user"] || body["model"] != "llama3-8b-8192" {
        return StatusCode::BAD_REQUEST.into_response();
    }

    completion(messages[1]["content"].clone()).into_response()
}

async fn client_for(router: Router) -> ChatCompletionClient {
    let base_url = spawn_server(router).await;
    ChatCompletionClient::new(&LlmSettings {
        base_url,
        api_key: API_KEY.to_string(),
        ..LlmSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn given_context_and_question_when_completing_then_sends_context_then_question() {
    let client =
        client_for(Router::new().route("/chat/completions", post(echo_user_message))).await;

    let answer = client
        .complete("What is the grace period?", "Thirty days.")
        .await
        .unwrap();

    assert_eq!(answer, "Context:\nThirty days.\n\nQuestion: What is the grace period?");
}

#[tokio::test]
async fn given_rate_limited_api_when_completing_then_returns_rate_limited() {
    let client = client_for(Router::new().route(
        "/chat/completions",
        post(|| async { StatusCode::TOO_MANY_REQUESTS }),
    ))
    .await;

    let result = client.complete("q", "c").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_request_failed() {
    let client = client_for(Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
    ))
    .await;

    let result = client.complete("q", "c").await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("model overloaded"));
        }
        other => panic!("expected ApiRequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_choices_when_completing_then_returns_invalid_response() {
    let client = client_for(Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    ))
    .await;

    let result = client.complete("q", "c").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_blank_content_when_completing_then_returns_invalid_response() {
    let client = client_for(Router::new().route(
        "/chat/completions",
        post(|| async { completion(json!("   ")) }),
    ))
    .await;

    let result = client.complete("q", "c").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_null_content_when_completing_then_returns_invalid_response() {
    let client = client_for(Router::new().route(
        "/chat/completions",
        post(|| async { completion(Value::Null) }),
    ))
    .await;

    let result = client.complete("q", "c").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}
