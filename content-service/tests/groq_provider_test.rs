//! Tests for the Groq provider against a mocked chat-completion API.
//! Run with: cargo test -p content-service --test groq_provider_test

use content_service::services::providers::groq::{GroqConfig, GroqProvider};
use content_service::services::providers::{
    ChatMessage, ChatProvider, ProviderError, SamplingParams,
};
use content_service::services::ContentGenerator;
use secrecy::Secret;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "llama-3.3-70b-versatile";

fn provider(server: &MockServer) -> GroqProvider {
    GroqProvider::new(GroqConfig {
        api_key: Secret::new("gsk_test_key".to_string()),
        base_url: format!("{}/openai/v1", server.uri()),
    })
    .expect("provider")
}

fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": MODEL,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}

#[tokio::test]
async fn sends_model_messages_and_sampling_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test_key"))
        .and(body_partial_json(json!({
            "model": MODEL,
            "messages": [{ "role": "user", "content": "Write a post" }],
            "temperature": 0.6,
            "top_p": 0.9
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello world")))
        .expect(1)
        .mount(&server)
        .await;

    let completion = provider(&server)
        .complete(
            MODEL,
            &[ChatMessage::user("Write a post")],
            &SamplingParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(completion.text, "Hello world");
    assert_eq!(completion.input_tokens, Some(42));
    assert_eq!(completion.output_tokens, Some(7));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = provider(&server)
        .complete(MODEL, &[ChatMessage::user("hi")], &SamplingParams::default())
        .await;

    match result {
        Err(ProviderError::Unauthorized(message)) => assert!(message.contains("invalid api key")),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = provider(&server)
        .complete(MODEL, &[ChatMessage::user("hi")], &SamplingParams::default())
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimited)));
}

#[tokio::test]
async fn missing_choices_is_an_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = provider(&server)
        .complete(MODEL, &[ChatMessage::user("hi")], &SamplingParams::default())
        .await;

    assert!(matches!(result, Err(ProviderError::EmptyResponse(_))));
}

#[tokio::test]
async fn malformed_body_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = provider(&server)
        .complete(MODEL, &[ChatMessage::user("hi")], &SamplingParams::default())
        .await;

    assert!(matches!(result, Err(ProviderError::ApiError(_))));
}

#[tokio::test]
async fn server_error_surfaces_as_error_variant_in_generated_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(3)
        .mount(&server)
        .await;

    let generator = ContentGenerator::new(Arc::new(provider(&server)), None, MODEL);
    let result = generator
        .generate(content_service::models::GenerationRequest {
            idea: "AI in healthcare".to_string(),
            target_audience: "hospital executives".to_string(),
            platform: "linkedin".into(),
            post_category: "tech trend".to_string(),
        })
        .await;

    let body = serde_json::to_value(&result).unwrap();
    for size in ["small", "medium", "long"] {
        let text = body["linkedin"][size].as_str().unwrap();
        assert!(text.starts_with("Error: API error: Chat completion API error 500"));
        assert!(text.contains("upstream exploded"));
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let provider = GroqProvider::new(GroqConfig {
        api_key: Secret::new("gsk_test_key".to_string()),
        base_url: "http://127.0.0.1:1/openai/v1".to_string(),
    })
    .unwrap();

    let result = provider
        .complete(MODEL, &[ChatMessage::user("hi")], &SamplingParams::default())
        .await;

    assert!(matches!(result, Err(ProviderError::NetworkError(_))));
}
