//! Client configuration and API key resolution

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{AgentError, Result};

/// Perplexity chat completions endpoint
pub const DEFAULT_ENDPOINT_URL: &str = "https://api.perplexity.ai/chat/completions";

/// Model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "sonar-reasoning";

pub const DEFAULT_TEMPERATURE: f64 = 0.2;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the default API key
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

/// Environment variable overriding the endpoint URL in the binaries
pub const BASE_URL_ENV: &str = "PERPLEXITY_BASE_URL";

/// Configuration for a [`ChatClient`](crate::ChatClient)
///
/// Built once and never mutated by the client. The key is kept out of the
/// `Debug` output.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub endpoint_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the default endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the endpoint URL
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the API key from an explicit value, falling back to a second
    /// source (usually the environment).
    ///
    /// Keys are trimmed and a blank key counts as missing.
    pub fn resolve(explicit: Option<String>, fallback: Option<String>) -> Result<Self> {
        let api_key = [explicit, fallback]
            .into_iter()
            .flatten()
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                AgentError::Configuration(format!(
                    "API key is required. Please provide it as an argument or set {} environment variable.",
                    API_KEY_ENV
                ))
            })?;

        Ok(Self::new(api_key))
    }

    /// Resolve the API key from `explicit`, else from `PERPLEXITY_API_KEY`.
    ///
    /// The environment is read here and only here.
    pub fn from_env(explicit: Option<String>) -> Result<Self> {
        Self::resolve(explicit, env::var(API_KEY_ENV).ok())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::new("pplx-key");
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key, "pplx-key");
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("pplx-key")
            .with_endpoint_url("http://localhost:9000/chat")
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.endpoint_url, "http://localhost:9000/chat");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_resolve_prefers_explicit_key() {
        let config =
            ClientConfig::resolve(Some("explicit".into()), Some("from-env".into())).unwrap();
        assert_eq!(config.api_key, "explicit");
    }

    #[test]
    fn test_resolve_falls_back() {
        let config = ClientConfig::resolve(None, Some("from-env".into())).unwrap();
        assert_eq!(config.api_key, "from-env");

        let config = ClientConfig::resolve(Some("   ".into()), Some(" from-env\n".into())).unwrap();
        assert_eq!(config.api_key, "from-env");
    }

    #[test]
    fn test_resolve_without_key_fails() {
        let err = ClientConfig::resolve(None, None).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));

        let err = ClientConfig::resolve(Some(String::new()), Some(" ".into())).unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", ClientConfig::new("secret-value"));
        assert!(!rendered.contains("secret-value"));
        assert!(rendered.contains("<12 chars>"));
    }
}
