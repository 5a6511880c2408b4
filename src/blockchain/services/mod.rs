//! Tool handlers, grouped by the kind of data they read.
//!
//! Each handler has the [`ToolHandler`] shape so the registry can hold them
//! as plain function values. Handlers return `Err` freely; the registry turns
//! every error into a text result.

use anyhow::{anyhow, Result};
use futures::future::BoxFuture;
use serde_json::Value;

use crate::blockchain::client::{self, ExplorerClient};

pub mod balance;
pub mod blocks;
pub mod contract;
pub mod fees;
pub mod history;
pub mod token;
pub mod transactions;

/// Signature shared by every tool handler.
pub type ToolHandler =
    for<'a> fn(&'a ExplorerClient, &'a Value) -> BoxFuture<'a, Result<Value>>;

/// The `result` member of an account/stats style response as a string.
///
/// A `status` of `"0"` with a string result is the explorer's error shape
/// (e.g. `NOTOK` / `Invalid API Key`) and is reported as such.
pub(crate) fn result_str(body: &Value) -> Result<&str> {
    reject_error_body(body)?;
    body.get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("explorer response has no string 'result'"))
}

/// The `result` member as a list.
pub(crate) fn result_array(body: &Value) -> Result<&Vec<Value>> {
    reject_error_body(body)?;
    body.get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("explorer response has no 'result' list"))
}

fn reject_error_body(body: &Value) -> Result<()> {
    Ok(client::check_rejection(body)?)
}

/// A string field of an upstream record.
pub(crate) fn field_str<'v>(record: &'v Value, key: &str) -> Result<&'v str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("missing field '{}' in explorer record", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_bodies_surface_their_reason() {
        let body = json!({ "status": "0", "message": "NOTOK", "result": "Invalid API Key" });
        assert_eq!(result_str(&body).unwrap_err().to_string(), "NOTOK: Invalid API Key");
        assert!(result_array(&body).is_err());
    }

    #[test]
    fn empty_lists_with_status_zero_are_not_errors() {
        let body = json!({ "status": "0", "message": "No transactions found", "result": [] });
        assert!(result_array(&body).unwrap().is_empty());
    }

    #[test]
    fn ok_bodies_pass_through() {
        let body = json!({ "status": "1", "message": "OK", "result": "100" });
        assert_eq!(result_str(&body).unwrap(), "100");
    }
}
