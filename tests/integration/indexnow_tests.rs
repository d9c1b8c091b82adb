//! IndexNow submissions against a mock endpoint

use crate::test_client;
use crawl_signal::config::IndexNowConfig;
use crawl_signal::{IndexNowClient, SignalError};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// IndexNow config pointing at the mock server with a short backoff
fn indexnow_config(server: &MockServer, max_retries: u32) -> IndexNowConfig {
    IndexNowConfig {
        endpoint: format!("{}/indexnow", server.uri()),
        max_retries,
        base_delay_ms: 10,
        ..IndexNowConfig::default()
    }
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

#[tokio::test]
async fn test_submit_sends_resolved_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "host": "example.com",
            "key": "abc123",
            "keyLocation": "https://example.com/abc123.txt",
            "urlList": ["https://example.com/a", "https://example.com/b"]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = IndexNowClient::new(test_client(), indexnow_config(&server, 4));
    let message = client
        .submit(
            &urls(&["https://example.com/a", "not a url", " https://example.com/b "]),
            None,
            Some("abc123"),
            None,
        )
        .await
        .unwrap();

    assert_eq!(message, "Submitted 2 URLs to IndexNow (status 202).");
}

#[tokio::test]
async fn test_submit_uses_configured_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(body_json(json!({
            "host": "cdn.example.com",
            "key": "from-config",
            "keyLocation": "https://example.com/key.txt",
            "urlList": ["https://example.com/"]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = IndexNowConfig {
        key: Some("from-config".to_string()),
        key_location: Some("https://example.com/key.txt".to_string()),
        ..indexnow_config(&server, 4)
    };
    let client = IndexNowClient::new(test_client(), config);
    let message = client
        .submit(&urls(&["https://example.com/"]), Some("cdn.example.com"), Some(""), None)
        .await
        .unwrap();

    assert_eq!(message, "Submitted 1 URLs to IndexNow (status 200).");
}

#[tokio::test]
async fn test_submit_retries_rate_limits() {
    let server = MockServer::start().await;

    // Mounted first, so it answers the first three requests
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = IndexNowClient::new(test_client(), indexnow_config(&server, 4));
    let started = Instant::now();
    let message = client
        .submit(
            &urls(&["https://example.com/a", "https://example.com/b"]),
            None,
            Some("k"),
            None,
        )
        .await
        .unwrap();

    assert_eq!(message, "Submitted 2 URLs to IndexNow (status 200).");
    // 10ms + 20ms + 40ms of backoff
    assert!(started.elapsed() >= Duration::from_millis(70));
}

#[tokio::test]
async fn test_submit_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(3)
        .mount(&server)
        .await;

    let client = IndexNowClient::new(test_client(), indexnow_config(&server, 2));
    let err = client
        .submit(&urls(&["https://example.com/"]), None, Some("k"), None)
        .await
        .unwrap_err();

    match err {
        SignalError::Http { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_server_error_is_not_retried() {
    let server = MockServer::start().await;
    let long_body = "x".repeat(800);

    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(500).set_body_string(long_body))
        .expect(1)
        .mount(&server)
        .await;

    let client = IndexNowClient::new(test_client(), indexnow_config(&server, 4));
    let err = client
        .submit(&urls(&["https://example.com/"]), None, Some("k"), None)
        .await
        .unwrap_err();

    match err {
        SignalError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body.chars().count(), 500);
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_without_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = IndexNowClient::new(test_client(), indexnow_config(&server, 4));
    let err = client
        .submit(&urls(&["https://example.com/"]), None, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, SignalError::MissingCredential(_)));
    assert_eq!(
        err.to_string(),
        "Missing API key for IndexNow. Provide via argument or environment variable."
    );
}

#[tokio::test]
async fn test_truncated_error_body_still_reports_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Promises a 100-byte body, sends a few bytes and hangs up
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.ends_with(b"]}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let config = IndexNowConfig {
        endpoint: format!("http://{}/indexnow", addr),
        ..IndexNowConfig::default()
    };
    let client = IndexNowClient::new(test_client(), config);
    let err = client
        .submit(&urls(&["https://example.com/"]), None, Some("k"), None)
        .await
        .unwrap_err();

    match err {
        SignalError::Http { status, body } => {
            assert_eq!(status, 503);
            assert!(body.is_empty());
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}
