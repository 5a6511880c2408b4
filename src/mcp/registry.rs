//! Name-indexed tool registry and the uniform call wrapper.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::services::ToolHandler;
use crate::mcp::protocol::{ToolInvocation, ToolResult};
use crate::mcp::tools;

/// What `tools/list` publishes for one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// A descriptor bound to its handler.
#[derive(Clone)]
pub struct Tool {
    pub descriptor: ToolDescriptor,
    /// Used in error text, e.g. `Error fetching balance: ...`.
    pub action: &'static str,
    handler: ToolHandler,
}

impl Tool {
    pub fn new(
        name: &'static str,
        description: &'static str,
        action: &'static str,
        input_schema: Value,
        handler: ToolHandler,
    ) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name,
                description,
                input_schema,
            },
            action,
            handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.descriptor
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Run the handler. Never fails: errors come back as an error result.
    pub async fn invoke(&self, explorer: &ExplorerClient, args: &Value) -> ToolResult {
        for key in self.required_arguments() {
            if matches!(args.get(key), None | Some(Value::Null)) {
                warn!(tool = self.name(), key, "missing required argument");
                return ToolResult::error(
                    self.action,
                    format_args!("missing required argument '{}'", key),
                );
            }
        }

        match (self.handler)(explorer, args).await {
            Ok(value) => {
                debug!(tool = self.name(), "tool succeeded");
                ToolResult::json(&value)
            }
            Err(e) => {
                warn!(tool = self.name(), "tool failed: {:#}", e);
                ToolResult::error(self.action, format_args!("{:#}", e))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Tool \"{0}\" not found")]
    ToolNotFound(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

/// Immutable after construction; shared behind an `Arc`.
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Tool>) -> Self {
        let index = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name(), i))
            .collect();
        Self { tools, index }
    }

    /// Registry holding the full catalog.
    pub fn builtin() -> Self {
        Self::new(tools::builtin_tools())
    }

    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(Tool::name)
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolve `params` of a `tools/call` and run the tool.
    pub async fn call(
        &self,
        explorer: &ExplorerClient,
        params: Option<&Value>,
    ) -> Result<ToolResult, DispatchError> {
        let params = params.ok_or_else(|| DispatchError::InvalidParams("missing params".into()))?;
        let invocation: ToolInvocation = serde_json::from_value(params.clone())
            .map_err(|e| DispatchError::InvalidParams(e.to_string()))?;
        let tool = self
            .get(&invocation.name)
            .ok_or_else(|| DispatchError::ToolNotFound(invocation.name.clone()))?;

        Ok(tool.invoke(explorer, &invocation.arguments).await)
    }
}
