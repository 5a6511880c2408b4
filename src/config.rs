// src/config.rs

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_EXPLORER_API_URL: &str = "https://api.arbiscan.io/api";

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Base URL of the Etherscan-compatible explorer API (`module`/`action` style).
    pub explorer_api_url: String,
    /// API key appended to every explorer request. May be empty; the explorer
    /// then answers with its own authorization error.
    pub explorer_api_key: String,
    /// Human-readable network label reported by the tools.
    pub network_name: String,

    /// Serve JSON-RPC over stdin/stdout instead of HTTP.
    pub mcp_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            explorer_api_url: DEFAULT_EXPLORER_API_URL.to_string(),
            explorer_api_key: String::new(),
            network_name: "Arbitrum".to_string(),
            mcp_mode: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => defaults.port,
        };

        let explorer_api_url = lookup("ARBISCAN_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.explorer_api_url);

        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            explorer_api_url,
            explorer_api_key: lookup("ARBISCAN_API_KEY").unwrap_or_default(),
            network_name: lookup("NETWORK_NAME").unwrap_or(defaults.network_name),
            mcp_mode: lookup("MCP_MODE").is_some(),
        })
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
