// src/blockchain/services/token.rs

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format;
use crate::blockchain::models::ExplorerError;
use crate::blockchain::services::result_str;
use crate::utils;

/// `decimals()`
pub const DECIMALS_SELECTOR: &str = "0x313ce567";
/// `name()`
pub const NAME_SELECTOR: &str = "0x06fdde03";
/// `symbol()`
pub const SYMBOL_SELECTOR: &str = "0x95d89b41";

/// ERC-20 metadata read from the contract itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Read decimals, name and symbol concurrently. Undecodable values fall back
/// to defaults; only transport failures are errors.
pub async fn token_metadata(
    explorer: &ExplorerClient,
    contract: &str,
) -> Result<TokenMetadata, ExplorerError> {
    let (decimals, name, symbol) = futures::try_join!(
        metadata_call(explorer, contract, DECIMALS_SELECTOR),
        metadata_call(explorer, contract, NAME_SELECTOR),
        metadata_call(explorer, contract, SYMBOL_SELECTOR),
    )?;

    Ok(TokenMetadata {
        name: format::token_name(name.as_str()),
        symbol: format::token_symbol(symbol.as_str()),
        decimals: format::decode_decimals(decimals.as_str()),
    })
}

/// A reverted call (token without `name()`, say) reads as an empty result so
/// the defaults apply. Rejections and transport failures still fail.
async fn metadata_call(
    explorer: &ExplorerClient,
    contract: &str,
    selector: &str,
) -> Result<Value, ExplorerError> {
    match explorer.eth_call(contract, selector).await {
        Err(ExplorerError::Rpc { code, message }) => {
            debug!(contract, selector, code, %message, "token metadata call reverted");
            Ok(Value::Null)
        }
        other => other,
    }
}

pub fn get_token_balance<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let contract = utils::required_str(args, "contractAddress")?;
        let address = utils::required_str(args, "address")?;

        let balance_query = [
            ("module", "account"),
            ("action", "tokenbalance"),
            ("contractaddress", contract.as_str()),
            ("address", address.as_str()),
            ("tag", "latest"),
        ];
        let (body, metadata) = futures::try_join!(
            explorer.fetch(&balance_query),
            token_metadata(explorer, &contract),
        )?;

        let balance = format::token_amount(result_str(&body)?, metadata.decimals)?;
        Ok(json!({
            "contractAddress": contract,
            "address": address,
            "tokenInfo": metadata,
            "balance": balance,
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}

pub fn get_token_info<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let contract = utils::required_str(args, "contractAddress")?;

        let supply_query = [
            ("module", "stats"),
            ("action", "tokensupply"),
            ("contractaddress", contract.as_str()),
        ];
        let (body, metadata) = futures::try_join!(
            explorer.fetch(&supply_query),
            token_metadata(explorer, &contract),
        )?;

        let total_supply = format::token_amount(result_str(&body)?, metadata.decimals)?;
        Ok(json!({
            "contractAddress": contract,
            "tokenInfo": {
                "name": metadata.name,
                "symbol": metadata.symbol,
                "decimals": metadata.decimals,
                "totalSupply": total_supply,
            },
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}
