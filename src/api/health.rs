use axum::{response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};

pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Arbitrum MCP Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn root_handler() -> &'static str {
    "Arbitrum MCP Server"
}
