//! Model client module for chat completions
//!
//! This module provides:
//! - `types`: Messages and per-call options
//! - `response`: The response envelope and JSON path lookup
//! - `client`: The HTTP chat client

mod client;
mod response;
mod types;

pub use client::ChatClient;
pub use response::{lookup, ChatResponse, PathSegment};
pub use types::{ChatOptions, ChatRequest, Message};
