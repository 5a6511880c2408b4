//! Argument helpers shared by the tool handlers.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use serde_json::{from_value, Value};

/// Extract and deserialize a required argument.
pub fn get_required_arg<T: DeserializeOwned>(args: &Value, key: &str) -> Result<T> {
    match args.get(key) {
        None | Some(Value::Null) => Err(anyhow!("missing required argument '{}'", key)),
        Some(value) => from_value(value.clone())
            .map_err(|e| anyhow!("invalid argument '{}': {}", key, e)),
    }
}

/// Optional scalar argument as text. Numbers are accepted for fields such as
/// block numbers; empty strings count as absent.
pub fn optional_str(args: &Value, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn required_str(args: &Value, key: &str) -> Result<String> {
    match args.get(key) {
        None | Some(Value::Null) => Err(anyhow!("missing required argument '{}'", key)),
        Some(_) => optional_str(args, key)
            .ok_or_else(|| anyhow!("argument '{}' must be a non-empty string", key)),
    }
}

pub fn str_or(args: &Value, key: &str, default: &str) -> String {
    optional_str(args, key).unwrap_or_else(|| default.to_string())
}

/// A list of strings. A single comma-separated string is accepted as well.
pub fn required_list(args: &Value, key: &str) -> Result<Vec<String>> {
    let list = match args.get(key) {
        Some(Value::String(joined)) => joined
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => get_required_arg::<Vec<String>>(args, key)?,
    };
    if list.is_empty() {
        return Err(anyhow!("argument '{}' must not be empty", key));
    }
    Ok(list)
}
