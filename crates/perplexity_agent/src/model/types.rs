//! Request-side types for the chat completions API

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Per-call generation options
///
/// `extra` holds passthrough fields that are merged into the payload after
/// `model`, `temperature` and `max_tokens`, so a colliding key in `extra`
/// wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub extra: Map<String, Value>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            extra: Map::new(),
        }
    }
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature (not range-checked)
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Add a passthrough field, replacing any earlier value for `key`
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One outgoing chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest<'a> {
    pub messages: &'a [Message],
    pub options: &'a ChatOptions,
}

impl<'a> ChatRequest<'a> {
    pub fn new(messages: &'a [Message], options: &'a ChatOptions) -> Self {
        Self { messages, options }
    }

    /// Build the JSON body: named fields first, then `extra` on top.
    ///
    /// `max_tokens` is left out entirely when unset.
    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("model".to_string(), json!(self.options.model));
        payload.insert(
            "messages".to_string(),
            self.messages
                .iter()
                .map(|m| json!({"role": m.role, "content": m.content}))
                .collect(),
        );
        payload.insert("temperature".to_string(), json!(self.options.temperature));
        if let Some(max_tokens) = self.options.max_tokens {
            payload.insert("max_tokens".to_string(), json!(max_tokens));
        }

        for (key, value) in &self.options.extra {
            payload.insert(key.clone(), value.clone());
        }

        Value::Object(payload)
    }
}
