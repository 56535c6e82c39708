//! HTTP oracle client tests against a mock server

use secrecy::SecretString;
use strategy_engine::{GenerationOracle, HttpOracleClient, OracleConfig, OracleError};

fn chat_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "content": content } }]
    })
    .to_string()
}

fn client_for(server_url: &str, retry_attempts: usize) -> HttpOracleClient {
    let config = OracleConfig {
        api_url: server_url.to_string(),
        retry_attempts,
        retry_backoff_ms: 1,
        timeout_secs: 5,
        ..OracleConfig::default()
    };
    HttpOracleClient::new(config, SecretString::new("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn generate_returns_completion_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(r#"{"strategies": []}"#))
        .create_async()
        .await;

    let client = client_for(&server.url(), 0);
    let content = client.generate("propose strategies").await.unwrap();
    assert_eq!(content, r#"{"strategies": []}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn prose_wrapped_content_still_parses() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_body(
            r#"Here you go: {"strategies": [{"name": "A"}]} good luck!"#,
        ))
        .create_async()
        .await;

    let client = client_for(&server.url(), 0);
    let content = client.generate("propose strategies").await.unwrap();
    let result = strategy_engine::evolution::parse_strategy_payload(&content).unwrap();
    assert_eq!(result.strategies.len(), 1);
    assert_eq!(result.strategies[0].name, "A");
}

#[tokio::test]
async fn server_errors_are_retried_then_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(503)
        .with_body("overloaded")
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server.url(), 1);
    let result = client.generate("propose strategies").await;
    assert!(matches!(result, Err(OracleError::Upstream(_))));
    // First attempt plus one retry.
    mock.assert_async().await;
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(401)
        .with_body("bad key")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), 3);
    let result = client.generate("propose strategies").await;
    assert!(matches!(result, Err(OracleError::Upstream(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_choices_is_an_empty_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0);
    let result = client.generate("propose strategies").await;
    assert!(matches!(result, Err(OracleError::Empty)));
}

#[tokio::test]
async fn disabled_oracle_rejects_without_calling_out() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(chat_body("unused"))
        .expect(0)
        .create_async()
        .await;

    let config = OracleConfig {
        enabled: false,
        api_url: server.url(),
        ..OracleConfig::default()
    };
    let client = HttpOracleClient::new(config, SecretString::new("k".to_string())).unwrap();
    let result = client.generate("propose strategies").await;
    assert!(matches!(result, Err(OracleError::Disabled)));
    mock.assert_async().await;
}
