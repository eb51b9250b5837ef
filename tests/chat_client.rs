//! HTTP chat client tests against a mock completions endpoint

use lease_auditor::{
    config::ChatConfig,
    negotiation::{build_context, ChatClient, ChatError, HttpChatClient},
};
use mockito::Matcher;
use secrecy::Secret;

fn config_for(server: &mockito::Server, max_retries: usize) -> ChatConfig {
    ChatConfig {
        base_endpoint: server.url(),
        api_key: Some(Secret::new("sk-test".to_string())),
        timeout_secs: 5,
        max_retries,
        ..ChatConfig::default()
    }
}

#[tokio::test]
async fn test_completion_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJsonString(
            r#"{"model": "llama-3.3-70b-versatile"}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Ask for $1,000 off the buyout."}}]}"#)
        .create_async()
        .await;

    let client = HttpChatClient::new(config_for(&server, 0)).unwrap();
    let context = build_context(Some("Residual: $18,000"), &[], "What should I ask for?").unwrap();

    let reply = client.complete(&context).await.unwrap();
    assert_eq!(reply, "Ask for $1,000 off the buyout.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_sends_full_context() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex(r#""role":"system""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
        .create_async()
        .await;

    let client = HttpChatClient::new(config_for(&server, 0)).unwrap();
    let context = build_context(None, &[], "Hello").unwrap();

    assert_eq!(client.complete(&context).await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retries_then_fails() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .expect(2)
        .create_async()
        .await;

    let client = HttpChatClient::new(config_for(&server, 1)).unwrap();
    let context = build_context(None, &[], "Hello").unwrap();

    let err = client.complete(&context).await.unwrap_err();
    assert!(matches!(err, ChatError::ApiError(ref msg) if msg.contains("500")));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_choices_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let client = HttpChatClient::new(config_for(&server, 0)).unwrap();
    let context = build_context(None, &[], "Hello").unwrap();

    let err = client.complete(&context).await.unwrap_err();
    assert!(matches!(err, ChatError::ApiError(_)));
}
