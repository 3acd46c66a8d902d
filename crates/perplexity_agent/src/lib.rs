//! perplexity_agent: client for the Perplexity chat completions API
//!
//! This library provides:
//! - A `ChatClient` that sends one request per call with bearer-token auth
//! - Three call styles: raw message lists, full-envelope questions and
//!   answer-text questions
//! - A small error taxonomy separating configuration, transport, upstream
//!   and response-shape failures
//!
//! # Example
//!
//! ```no_run
//! use perplexity_agent::{ChatClient, ChatOptions, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> perplexity_agent::Result<()> {
//!     let client = ChatClient::new(ClientConfig::from_env(None)?)?;
//!
//!     let answer = client
//!         .ask("What is the capital of France?", &ChatOptions::default())
//!         .await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Core functionality
pub mod model;

// Re-export commonly used types and functions
pub use error::{AgentError, Result};

// Config re-exports
pub use config::{
    load_dotenv, load_dotenv_from, ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_ENDPOINT_URL,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};

// Model re-exports
pub use model::{lookup, ChatClient, ChatOptions, ChatRequest, ChatResponse, Message, PathSegment};
