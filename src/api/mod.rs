//! # API Module
//!
//! HTTP surface of the server, mounted under `/api`.
//!
//! ## Available Endpoints
//!
//! - `GET /api` - greeting
//! - `GET /api/health` - liveness with a timestamp
//! - `POST /api/mcp` - JSON-RPC endpoint for MCP clients

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod health;
pub mod rpc;

/// The full application router with its layers applied.
pub fn build_router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/mcp", post(rpc::mcp_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
