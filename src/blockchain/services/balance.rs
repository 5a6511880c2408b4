use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format::{self, NATIVE_DECIMALS};
use crate::blockchain::models::AccountBalance;
use crate::blockchain::services::{result_array, result_str};
use crate::utils;

/// Native balance of a single address.
pub fn get_balance<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let body = explorer
            .fetch(&[
                ("module", "account"),
                ("action", "balance"),
                ("address", address.as_str()),
                ("tag", "latest"),
            ])
            .await?;

        let balance = format::native_amount(result_str(&body)?)?;
        Ok(json!({
            "address": address,
            "balance": balance,
            "network": explorer.network(),
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}

/// Native balances of several addresses in one explorer call.
pub fn get_multi_balance<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let addresses = utils::required_list(args, "addresses")?;
        let joined = addresses.join(",");
        let body = explorer
            .fetch(&[
                ("module", "account"),
                ("action", "balancemulti"),
                ("address", joined.as_str()),
                ("tag", "latest"),
            ])
            .await?;

        let entries: Vec<AccountBalance> =
            serde_json::from_value(Value::Array(result_array(&body)?.clone()))?;
        let balances = entries
            .iter()
            .map(|entry| -> Result<Value> {
                Ok(json!({
                    "address": entry.account,
                    "balance": format::native_amount(&entry.balance)?,
                    "network": explorer.network(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "totalAddresses": addresses.len(),
            "balances": balances,
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}

/// Total native supply reported by the explorer.
pub fn get_eth_supply<'a>(explorer: &'a ExplorerClient, _args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let body = explorer
            .fetch(&[("module", "stats"), ("action", "ethsupply")])
            .await?;
        let raw = result_str(&body)?;
        let supply = format::parse_amount(raw)?;

        Ok(json!({
            "totalSupply": raw,
            "totalSupplyInEth": format::to_fixed(supply, NATIVE_DECIMALS, 2)?,
            "status": body["status"],
            "message": body["message"],
        }))
    }
    .boxed()
}
