//! Error types for chat client operations

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// No usable API key, or a client that could not be built from the config.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced a readable response: DNS failure, refused
    /// connection, timeout, or a success body that is not JSON.
    #[error("Failed to make request to Perplexity API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Perplexity API returned HTTP {status}{}", body_suffix(.body))]
    Upstream { status: u16, body: Option<String> },

    #[error("Unexpected response format from Perplexity API: {response}")]
    MalformedResponse { response: Value },
}

impl AgentError {
    /// HTTP status reported by the upstream service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AgentError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AgentError::Transport(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AgentError::Transport(e) if e.is_timeout())
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) => format!(" Response: {}", text),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
