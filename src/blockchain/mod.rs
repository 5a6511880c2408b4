// src/blockchain/mod.rs

// Explorer API client
pub mod client;
pub use client::ExplorerClient;

// Upstream payloads, display formatting and the per-tool handlers
pub mod format;
pub mod models;
pub mod services;
