//! Chat-completion collaborator client
//!
//! Sends a [`NegotiationContext`] to an OpenAI-compatible endpoint and
//! returns the assistant reply. Retries with exponential backoff on
//! transport errors and non-success statuses.

use super::models::{ChatMessage, NegotiationContext};
use crate::config::{ChatConfig, MAX_CHAT_RETRIES};
use crate::error::AuditError;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const BASE_BACKOFF_MS: u64 = 100;

/// Longest wait between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// Exponential backoff before retry `attempt` (1-based), capped at [`MAX_BACKOFF`]
fn backoff(attempt: usize) -> Duration {
    let shift = attempt.min(16) as u32;
    Duration::from_millis(BASE_BACKOFF_MS << shift).min(MAX_BACKOFF)
}

/// Chat collaborator
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Return the assistant's reply to the context's last user message
    async fn complete(&self, context: &NegotiationContext) -> Result<String, ChatError>;
}

/// HTTP chat client for OpenAI-compatible APIs
pub struct HttpChatClient {
    client: Client,
    config: ChatConfig,
}

impl HttpChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ChatError::InitializationError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    async fn send_once(&self, request: &ChatCompletionRequest<'_>) -> Result<String, ChatError> {
        let mut req = self.client.post(self.config.completions_url()).json(request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.bearer_auth(api_key.expose_secret());
        }

        let response = req
            .send()
            .await
            .map_err(|e| ChatError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let parsed = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ChatError::ApiError(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::ApiError("No choices in response".to_string()))
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, context: &NegotiationContext) -> Result<String, ChatError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: context.messages(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        debug!(
            messages = context.len(),
            chars = context.char_count(),
            "Sending negotiation context"
        );

        let attempts = self.config.max_retries.min(MAX_CHAT_RETRIES) + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                debug!("Retry attempt {} for chat completion", attempt);
                tokio::time::sleep(backoff(attempt)).await;
            }

            match self.send_once(&request).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    warn!("Chat completion attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ChatError::Unknown))
    }
}

/// Chat client errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unknown error")]
    Unknown,
}

impl From<ChatError> for AuditError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::InitializationError(msg) => AuditError::Configuration(msg),
            other => AuditError::Upstream(other.to_string()),
        }
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpChatClient::new(ChatConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_error_conversion() {
        let err: AuditError = ChatError::NetworkError("connection refused".to_string()).into();
        assert!(matches!(err, AuditError::Upstream(_)));

        let err: AuditError = ChatError::InitializationError("tls".to_string()).into();
        assert!(matches!(err, AuditError::Configuration(_)));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff(1), Duration::from_millis(200));
        assert_eq!(backoff(2), Duration::from_millis(400));
        assert_eq!(backoff(6), MAX_BACKOFF);
        assert_eq!(backoff(64), MAX_BACKOFF);
        assert_eq!(backoff(usize::MAX), MAX_BACKOFF);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Ask for 5% off."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Ask for 5% off.");
    }
}
