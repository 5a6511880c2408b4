//! # MCP Handler Module
//!
//! Implements the Model Context Protocol surface of the server: the
//! JSON-RPC method switch shared by the HTTP endpoint and stdio mode.
//!
//! ## Supported methods
//!
//! - `initialize` - fixed protocol version, server info and capabilities
//! - `ping` - liveness, returns `{}`
//! - `tools/list` - the tool catalog
//! - `tools/call` - run one tool; failures inside the tool come back as an
//!   error *result*, never as a JSON-RPC error
//!
//! Anything else is answered with `-32601`.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::{
    mcp::protocol::{error_codes, Request, Response, JSONRPC_VERSION},
    AppState,
};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "Arbitrum Analytics Service";
pub const SERVER_VERSION: &str = "1.0.0";

/// Decode a raw request body.
///
/// Bytes that are not JSON give a parse error envelope. JSON that is not a
/// request object gives an internal error that still echoes `id` and
/// `jsonrpc` when they can be read.
pub fn parse_request(body: &[u8]) -> Result<Request, Response> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        error!("JSON parse error: {}", e);
        Response::error_with_data(
            Some(JSONRPC_VERSION.to_string()),
            Some(Value::Null),
            error_codes::PARSE_ERROR,
            "Parse error",
            json!(e.to_string()),
        )
    })?;

    let (jsonrpc, id) = match value.as_object() {
        Some(object) => (
            object
                .get("jsonrpc")
                .and_then(Value::as_str)
                .map(str::to_string),
            object.get("id").cloned(),
        ),
        None => (Some(JSONRPC_VERSION.to_string()), Some(Value::Null)),
    };

    serde_json::from_value::<Request>(value).map_err(|e| {
        error!("Invalid request: {}", e);
        Response::error_with_data(
            jsonrpc,
            id,
            error_codes::INTERNAL_ERROR,
            "Internal error",
            json!(e.to_string()),
        )
    })
}

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, state: &AppState) -> Response {
    info!("Handling MCP request for method: {}", req.method);

    match req.method.as_str() {
        "initialize" => handle_initialize(&req),
        "ping" => req.reply(json!({})),
        "tools/list" => handle_tools_list(&req, state),
        "tools/call" => handle_tool_call(&req, state).await,
        other => req.reply_error(
            error_codes::METHOD_NOT_FOUND,
            format!("Method \"{}\" not found", other),
        ),
    }
}

fn handle_initialize(req: &Request) -> Response {
    let server_info = json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION
    });
    let instructions = "Read-only Arbitrum explorer queries: balances, transactions, blocks, \
        token metadata, contract source and gas prices.";

    req.reply(json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "serverInfo": server_info,
        "instructions": instructions
    }))
}

fn handle_tools_list(req: &Request, state: &AppState) -> Response {
    req.reply(json!({ "tools": state.registry.descriptors() }))
}

async fn handle_tool_call(req: &Request, state: &AppState) -> Response {
    match state.registry.call(&state.explorer, req.params.as_ref()).await {
        Ok(result) => match serde_json::to_value(result) {
            Ok(value) => req.reply(value),
            Err(e) => internal_error(req, e),
        },
        Err(e) => internal_error(req, e),
    }
}

fn internal_error(req: &Request, e: impl std::fmt::Display) -> Response {
    error!("tools/call failed: {}", e);
    req.reply_error_with_data(error_codes::INTERNAL_ERROR, "Internal error", json!(e.to_string()))
}
