// src/blockchain/services/contract.rs

use anyhow::{anyhow, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use tracing::debug;

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format;
use crate::blockchain::models::{ContractCreation, ContractSource};
use crate::blockchain::services::result_array;
use crate::utils;

/// Contract ABI as returned by the explorer.
pub fn get_contract_abi<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let body = explorer
            .fetch(&[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", address.as_str()),
            ])
            .await?;
        Ok(body)
    }
    .boxed()
}

/// Verified source, compiler settings and parsed ABI.
pub fn get_contract_source<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let body = explorer
            .fetch(&[
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", address.as_str()),
            ])
            .await?;

        let first = result_array(&body)?
            .first()
            .ok_or_else(|| anyhow!("explorer returned no source entry for {}", address))?;
        let source: ContractSource = serde_json::from_value(first.clone())?;

        Ok(json!({
            "contractAddress": address,
            "contractInfo": {
                "name": source.contract_name,
                "compiler": source.compiler_version,
                "optimized": source.optimization_used == "1",
                "runs": source.runs,
                "evmVersion": source.evm_version,
                "licenseType": source.license_type,
                "isProxy": source.proxy == "1",
                "implementation": non_empty(&source.implementation),
            },
            "sourceCode": source.source_code,
            "abi": parse_abi(&source.abi),
            "constructorArguments": source.constructor_arguments,
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}

/// Creator address and creation transaction for each contract.
pub fn get_contract_creation<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let addresses = utils::required_list(args, "contractAddresses")?;
        let joined = addresses.join(",");
        let body = explorer
            .fetch(&[
                ("module", "contract"),
                ("action", "getcontractcreation"),
                ("contractaddresses", joined.as_str()),
            ])
            .await?;

        let entries: Vec<ContractCreation> =
            serde_json::from_value(Value::Array(result_array(&body)?.clone()))?;
        let contracts: Vec<Value> = entries
            .into_iter()
            .map(|entry| {
                json!({
                    "contractAddress": entry.contract_address,
                    "creatorAddress": entry.contract_creator,
                    "txHash": entry.tx_hash,
                    "creationDetails": {
                        "creator": entry.contract_creator,
                        "transactionHash": entry.tx_hash,
                    },
                })
            })
            .collect();

        Ok(json!({
            "totalContracts": addresses.len(),
            "contracts": contracts,
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}

/// Contract or externally owned account, decided by deployed code.
pub fn get_address_type<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let code = explorer
            .proxy(
                "eth_getCode",
                &[("address", address.as_str()), ("tag", "latest")],
            )
            .await?;

        Ok(json!({
            "address": address,
            "addressType": format::classify_code(code.as_str()),
            "network": explorer.network(),
        }))
    }
    .boxed()
}

/// Format check only; never touches the explorer. The input is checked as
/// given, without trimming.
pub fn validate_address<'a>(_explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address: String = utils::get_required_arg(args, "address")?;
        let is_valid = format::is_valid_address(&address);
        Ok(json!({
            "address": address,
            "isValid": is_valid,
            "format": if is_valid { "valid Ethereum address" } else { "invalid address format" },
        }))
    }
    .boxed()
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// Unverified contracts carry a message instead of an ABI; that reads as null.
fn parse_abi(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!("contract ABI is not JSON: {}", e);
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_parsing() {
        assert_eq!(parse_abi(""), Value::Null);
        assert_eq!(parse_abi("Contract source code not verified"), Value::Null);
        assert_eq!(parse_abi(r#"[{"type":"fallback"}]"#), json!([{ "type": "fallback" }]));
    }
}
