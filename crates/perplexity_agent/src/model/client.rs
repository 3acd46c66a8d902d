//! Chat client for the Perplexity chat completions API

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use super::response::ChatResponse;
use super::types::{ChatOptions, ChatRequest, Message};
use crate::config::ClientConfig;
use crate::error::{AgentError, Result};

/// Client for a single chat completions endpoint
///
/// Holds only immutable configuration after construction, so it can be
/// cloned or shared behind an `Arc` and used from many tasks at once. Every
/// call issues exactly one request; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ChatClient {
    /// Create a new ChatClient
    ///
    /// Fails with [`AgentError::Configuration`] if the key is blank or cannot
    /// be carried in an `Authorization` header.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::Configuration(
                "API key is required and must not be empty".to_string(),
            ));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                AgentError::Configuration(
                    "API key contains characters that are not valid in an HTTP header".to_string(),
                )
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create a client whose key comes from `api_key`, else from the
    /// `PERPLEXITY_API_KEY` environment variable.
    pub fn from_env(api_key: Option<String>) -> Result<Self> {
        Self::new(ClientConfig::from_env(api_key)?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint_url(&self) -> &str {
        &self.config.endpoint_url
    }

    /// Send a chat completion request and return the parsed body of any 2xx
    /// response.
    pub async fn send(&self, messages: &[Message], options: &ChatOptions) -> Result<ChatResponse> {
        let payload = ChatRequest::new(messages, options).to_payload();

        debug!(
            endpoint = %self.config.endpoint_url,
            model = %options.model,
            messages = messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&self.config.endpoint_url)
            .json(&payload)
            .send()
            .await
            .map_err(AgentError::Transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "chat completion response received");

        if !status.is_success() {
            // The error body is best effort: an unreadable body is dropped.
            let body = response.text().await.ok().filter(|text| !text.is_empty());
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(AgentError::Transport)?;
        Ok(ChatResponse::new(body))
    }

    /// Ask a single question and return the answer text.
    ///
    /// Fails with [`AgentError::MalformedResponse`] when the response has no
    /// `choices[0].message.content` string.
    pub async fn ask(&self, question: &str, options: &ChatOptions) -> Result<String> {
        let response = self.ask_full(question, options).await?;

        if let Some(answer) = response.answer() {
            return Ok(answer.to_string());
        }

        Err(AgentError::MalformedResponse {
            response: response.into_value(),
        })
    }

    /// Ask a single question and return the full response envelope.
    pub async fn ask_full(&self, question: &str, options: &ChatOptions) -> Result<ChatResponse> {
        self.send(&[Message::user(question)], options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_rejects_blank_key() {
        let err = ChatClient::new(ClientConfig::new("  ")).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_new_rejects_key_with_newline() {
        let err = ChatClient::new(ClientConfig::new("pplx-abc\ndef")).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_new_keeps_config() {
        let config = ClientConfig::new("pplx-key")
            .with_endpoint_url("http://127.0.0.1:1/chat/completions")
            .with_timeout(Duration::from_secs(5));
        let client = ChatClient::new(config).unwrap();

        assert_eq!(client.endpoint_url(), "http://127.0.0.1:1/chat/completions");
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_client_is_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<ChatClient>();
    }
}
