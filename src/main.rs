// src/main.rs

use anyhow::{Context, Result};
use arbitrum_mcp_server::{
    api::build_router,
    config::Config,
    mcp::handler::{handle_mcp_request, parse_request},
    AppState,
};
use std::env;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> Result<()> {
    let addr = state.config.socket_addr()?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}

// --- MCP Server Logic ---
async fn run_mcp_server(state: AppState) -> Result<()> {
    info!("🚀 Starting MCP server on stdin/stdout...");

    let mut stdin = io::BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    loop {
        let mut line = String::new();

        match stdin.read_line(&mut line).await {
            Ok(0) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!("Received: {}", line);

                let response = match parse_request(line.as_bytes()) {
                    Ok(request) if request.is_notification() => {
                        debug!("Notification {} needs no reply", request.method);
                        continue;
                    }
                    Ok(request) => handle_mcp_request(request, &state).await,
                    Err(response) => response,
                };

                match serde_json::to_string(&response) {
                    Ok(response_json) => {
                        debug!("Sending: {}", response_json);
                        if let Err(e) = stdout
                            .write_all(format!("{}\n", response_json).as_bytes())
                            .await
                        {
                            error!("Failed to write response: {}", e);
                            break;
                        }
                        stdout.flush().await.ok();
                    }
                    Err(e) => error!("Failed to serialize response: {}", e),
                }
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        }
    }

    info!("MCP server shutting down");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for the stdio protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arbitrum_mcp_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().map_err(|e| {
        error!("❌ Failed to load configuration: {:#}", e);
        e
    })?;
    if env::args().any(|arg| arg == "--mcp") {
        config.mcp_mode = true;
    }

    let mcp_mode = config.mcp_mode;
    let app_state = AppState::new(config).map_err(|e| {
        error!("❌ Failed to initialize explorer client: {:#}", e);
        e
    })?;

    if mcp_mode {
        run_mcp_server(app_state).await
    } else {
        run_http_server(app_state).await
    }
}
