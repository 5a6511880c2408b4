//! Block-explorer client.
//!
//! Every tool reads chain data through this client. It speaks the
//! Etherscan-style `module`/`action` query API over plain HTTP GET and hands
//! the raw JSON back to the caller; reshaping is left to the services layer.

use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::blockchain::models::ExplorerError;
use crate::config::Config;

/// Cheap-to-clone handle on the explorer API.
#[derive(Clone, Debug)]
pub struct ExplorerClient {
    http: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
    network: Arc<str>,
}

impl ExplorerClient {
    /// Create a client for the given endpoint. An empty `api_key` is allowed.
    pub fn new(base_url: &str, api_key: &str, network: &str) -> Result<Self, ExplorerError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ExplorerError::Client)?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url),
            api_key: Arc::from(api_key),
            network: Arc::from(network),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ExplorerError> {
        if config.explorer_api_key.is_empty() {
            warn!("ARBISCAN_API_KEY is not set; explorer requests will be unauthenticated");
        }
        Self::new(
            &config.explorer_api_url,
            &config.explorer_api_key,
            &config.network_name,
        )
    }

    /// Network label reported alongside tool output.
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Issue one GET with `query` plus the API key and return the decoded body.
    pub async fn fetch(&self, query: &[(&str, &str)]) -> Result<Value, ExplorerError> {
        let module = lookup(query, "module");
        let action = lookup(query, "action");
        debug!(module, action, "explorer request");

        let response = self
            .http
            .get(self.base_url.as_ref())
            .query(query)
            .query(&[("apikey", self.api_key.as_ref())])
            .send()
            .await
            .map_err(|e| ExplorerError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(module, action, %status, "explorer returned an error status");
            return Err(ExplorerError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ExplorerError::Decode(e.without_url()))
    }

    /// Call a `module=proxy` action and return its JSON-RPC `result` member
    /// (JSON null when absent).
    ///
    /// The explorer answers rejected proxy calls (bad key, rate limit) with
    /// its account-style `status: "0"` body, and node failures with a
    /// JSON-RPC `error` member; both are errors here.
    pub async fn proxy(&self, action: &str, params: &[(&str, &str)]) -> Result<Value, ExplorerError> {
        let mut query = vec![("module", "proxy"), ("action", action)];
        query.extend_from_slice(params);
        let body = self.fetch(&query).await?;

        check_rejection(&body)?;
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            warn!(action, %error, "explorer proxy call failed");
            return Err(ExplorerError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string()),
            });
        }
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Read-only contract call at the latest block; `data` is the hex calldata.
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<Value, ExplorerError> {
        self.proxy("eth_call", &[("to", to), ("data", data), ("tag", "latest")])
            .await
    }
}

/// Fail on the explorer's rejection shape: `status` `"0"` with a string
/// `result` holding the reason. A `"0"` status with a list result only means
/// "nothing found".
pub fn check_rejection(body: &Value) -> Result<(), ExplorerError> {
    let failed = body.get("status").and_then(Value::as_str) == Some("0");
    match (failed, body.get("result").and_then(Value::as_str)) {
        (true, Some(reason)) => Err(ExplorerError::Rejected {
            message: body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("NOTOK")
                .to_string(),
            reason: reason.to_string(),
        }),
        _ => Ok(()),
    }
}

fn lookup<'a>(query: &[(&str, &'a str)], key: &str) -> &'a str {
    query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}
