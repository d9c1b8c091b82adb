//! Perplexity status checks against a mock API

use crate::test_client;
use crawl_signal::config::PerplexityConfig;
use crawl_signal::{PerplexityClient, SignalError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn perplexity_client(server: &MockServer) -> PerplexityClient {
    let config = PerplexityConfig {
        endpoint: format!("{}/chat/completions", server.uri()),
        ..PerplexityConfig::default()
    };
    PerplexityClient::new(test_client(), config)
}

#[tokio::test]
async fn test_check_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer pplx-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "model": "sonar-pro",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "The page is retrievable." } },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = perplexity_client(&server)
        .check("https://example.com/post", Some("pplx-test"), None)
        .await
        .unwrap();

    assert_eq!(answer, "The page is retrievable.");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "sonar-pro");
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(body["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("URL: https://example.com/post."));
}

#[tokio::test]
async fn test_check_uses_requested_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    perplexity_client(&server)
        .check("https://example.com/", Some("k"), Some("sonar"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "sonar");
}

#[tokio::test]
async fn test_check_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid key"}"#))
        .mount(&server)
        .await;

    let err = perplexity_client(&server)
        .check("https://example.com/", Some("bad"), None)
        .await
        .unwrap_err();

    match err {
        SignalError::Http { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid key"));
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_check_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = perplexity_client(&server)
        .check("https://example.com/", Some("k"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SignalError::Decoding(ref msg) if msg == "No choices returned"));
}

#[tokio::test]
async fn test_check_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = perplexity_client(&server)
        .check("https://example.com/", Some("k"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SignalError::Decoding(_)));
}
