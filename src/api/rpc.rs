use axum::{body::Bytes, extract::State, Json};

use crate::{
    mcp::{
        handler::{handle_mcp_request, parse_request},
        protocol::Response,
    },
    AppState,
};

/// Forward a JSON-RPC request body to the MCP dispatcher.
///
/// The body is taken as raw bytes so malformed input still gets a JSON-RPC
/// error envelope (HTTP 200) rather than axum's rejection.
pub async fn mcp_handler(State(state): State<AppState>, body: Bytes) -> Json<Response> {
    match parse_request(&body) {
        Ok(req) => Json(handle_mcp_request(req, &state).await),
        Err(resp) => Json(resp),
    }
}
