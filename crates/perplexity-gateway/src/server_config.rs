//! Gateway configuration read from the environment

use std::env;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use perplexity_agent::{
    load_dotenv_from, ChatClient, ClientConfig, BASE_URL_ENV, DEFAULT_ENDPOINT_URL,
};

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub bind_port: u16,
    pub base_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: get_env_or("BIND_ADDR", "0.0.0.0"),
            bind_port: get_env_num_or("BIND_PORT", 8000),
            base_url: get_env_or(BASE_URL_ENV, DEFAULT_ENDPOINT_URL),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind_addr, self.bind_port))
    }

    /// Build the shared client. A failure is logged and leaves the gateway
    /// running in a degraded state where every call route answers 503.
    pub fn build_client(&self) -> Option<ChatClient> {
        let client = ClientConfig::from_env(None)
            .map(|config| config.with_endpoint_url(&self.base_url))
            .and_then(ChatClient::new);

        match client {
            Ok(client) => {
                tracing::info!(
                    "chat client ready: endpoint={} api_key len={}",
                    client.endpoint_url(),
                    client.config().api_key.len()
                );
                Some(client)
            }
            Err(e) => {
                tracing::error!("failed to initialize chat client: {}", e);
                None
            }
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "gateway bind={}:{} upstream={}",
            self.bind_addr,
            self.bind_port,
            self.base_url
        );
    }
}

/// Load an env file if present. A malformed file is logged and skipped so the
/// gateway still starts from the process environment.
pub fn load_env_file(path: &Path) -> bool {
    match load_dotenv_from(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!("{}; continuing without it", e);
            false
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            tracing::debug!("ENV `{}` not set, using default", name);
            default.to_string()
        }
    }
}

fn get_env_num_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(name) {
        Ok(v) => match v.trim().parse::<T>() {
            Ok(x) => x,
            Err(_) => {
                tracing::warn!("ENV `{}` invalid value `{}`, using default", name, v);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_socket_addr() {
        let cfg = GatewayConfig {
            bind_addr: "127.0.0.1".to_string(),
            bind_port: 8123,
            base_url: DEFAULT_ENDPOINT_URL.to_string(),
        };
        assert_eq!(cfg.socket_addr().unwrap(), "127.0.0.1:8123".parse().unwrap());
    }

    #[test]
    fn test_socket_addr_rejects_garbage() {
        let cfg = GatewayConfig {
            bind_addr: "not an address".to_string(),
            bind_port: 8000,
            base_url: DEFAULT_ENDPOINT_URL.to_string(),
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_get_env_num_or_falls_back_on_invalid() {
        env::set_var("PERPLEXITY_GATEWAY_TEST_PORT", "eighty");
        assert_eq!(get_env_num_or("PERPLEXITY_GATEWAY_TEST_PORT", 8000u16), 8000);

        env::set_var("PERPLEXITY_GATEWAY_TEST_PORT", " 9001 ");
        assert_eq!(get_env_num_or("PERPLEXITY_GATEWAY_TEST_PORT", 8000u16), 9001);
    }

    #[test]
    fn test_malformed_env_file_does_not_stop_startup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "BROKEN 'line").unwrap();
        assert!(!load_env_file(file.path()));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PERPLEXITY_GATEWAY_ENV_FILE_TEST=ok").unwrap();
        assert!(load_env_file(file.path()));
        assert_eq!(get_env_or("PERPLEXITY_GATEWAY_ENV_FILE_TEST", "unset"), "ok");
    }

    #[test]
    fn test_get_env_or_default() {
        assert_eq!(
            get_env_or("PERPLEXITY_GATEWAY_TEST_UNSET", "fallback"),
            "fallback"
        );
    }
}
