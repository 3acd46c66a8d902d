//! Configuration module for perplexity_agent
//!
//! This module contains:
//! - `client`: Client configuration and API key resolution
//! - `dotenv`: `.env` file loading for the binaries

mod client;
mod dotenv;

pub use client::{
    ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_ENDPOINT_URL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
pub use dotenv::{load_dotenv, load_dotenv_from};
