// src/blockchain/models.rs
use serde::Deserialize;
use thiserror::Error;

// --- Error types for explorer access ---

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
    /// Network-level failure. The request URL is stripped so the API key never leaks.
    #[error("{0}")]
    Transport(reqwest::Error),
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("invalid JSON from explorer: {0}")]
    Decode(reqwest::Error),
    /// `status: "0"` body carrying the explorer's reason, e.g. `NOTOK: Invalid API Key`.
    #[error("{message}: {reason}")]
    Rejected { message: String, reason: String },
    /// `error` member of a proxy (JSON-RPC) response.
    #[error("explorer RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

// --- Upstream payloads ---

/// One row of `module=account&action=balancemulti`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalance {
    pub account: String,
    pub balance: String,
}

/// `module=gastracker&action=gasoracle` result, prices in gwei.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasOracle {
    pub safe_gas_price: String,
    pub propose_gas_price: String,
    pub fast_gas_price: String,
}

/// One row of `module=contract&action=getsourcecode`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContractSource {
    pub source_code: String,
    #[serde(rename = "ABI")]
    pub abi: String,
    pub contract_name: String,
    pub compiler_version: String,
    pub optimization_used: String,
    pub runs: String,
    pub constructor_arguments: String,
    #[serde(rename = "EVMVersion")]
    pub evm_version: String,
    pub license_type: String,
    pub proxy: String,
    pub implementation: String,
}

/// One row of `module=contract&action=getcontractcreation`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCreation {
    pub contract_address: String,
    pub contract_creator: String,
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_error_reads_like_an_http_failure() {
        assert_eq!(
            ExplorerError::Status(429).to_string(),
            "Request failed with status code 429"
        );
    }

    #[test]
    fn rejections_read_like_the_explorer_reason() {
        let err = ExplorerError::Rejected {
            message: "NOTOK".into(),
            reason: "Invalid API Key".into(),
        };
        assert_eq!(err.to_string(), "NOTOK: Invalid API Key");
        let err = ExplorerError::Rpc {
            code: -32000,
            message: "invalid argument 0: hex string has length 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "explorer RPC error -32000: invalid argument 0: hex string has length 2"
        );
    }

    #[test]
    fn contract_source_tolerates_missing_fields() {
        let source: ContractSource = serde_json::from_value(json!({
            "ContractName": "Token",
            "ABI": "[]",
            "EVMVersion": "paris",
            "Proxy": "1"
        }))
        .unwrap();
        assert_eq!(source.contract_name, "Token");
        assert_eq!(source.evm_version, "paris");
        assert_eq!(source.proxy, "1");
        assert!(source.implementation.is_empty());
    }
}
