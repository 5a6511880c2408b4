// src/lib.rs

use std::sync::Arc;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod mcp;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::Config>,
    /// Client for the block-explorer API
    pub explorer: blockchain::ExplorerClient,
    /// Tool catalog, built once at startup
    pub registry: Arc<mcp::registry::ToolRegistry>,
}

impl AppState {
    pub fn new(config: config::Config) -> anyhow::Result<Self> {
        let explorer = blockchain::ExplorerClient::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            explorer,
            registry: Arc::new(mcp::registry::ToolRegistry::builtin()),
        })
    }
}
