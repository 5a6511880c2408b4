// src/blockchain/services/transactions.rs

use anyhow::{bail, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format;
use crate::utils;

const TX_BY_HASH: &str = "eth_getTransactionByHash";
const TX_RECEIPT: &str = "eth_getTransactionReceipt";
/// Receipt status of a successful transaction.
const RECEIPT_SUCCESS: &str = "0x1";

/// Raw `eth_getTransactionByHash` response.
pub fn get_transaction<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let tx_hash = utils::required_str(args, "txHash")?;
        let body = explorer
            .fetch(&[
                ("module", "proxy"),
                ("action", TX_BY_HASH),
                ("txhash", tx_hash.as_str()),
            ])
            .await?;
        Ok(body)
    }
    .boxed()
}

/// Raw `eth_getTransactionReceipt` response.
pub fn get_transaction_receipt<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let tx_hash = utils::required_str(args, "txHash")?;
        let body = explorer
            .fetch(&[
                ("module", "proxy"),
                ("action", TX_RECEIPT),
                ("txhash", tx_hash.as_str()),
            ])
            .await?;
        Ok(body)
    }
    .boxed()
}

/// Transaction and receipt fetched together and folded into one status view.
pub fn get_transaction_status<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let tx_hash = utils::required_str(args, "txHash")?;
        let params = [("txhash", tx_hash.as_str())];
        let (tx, receipt) = futures::try_join!(
            explorer.proxy(TX_BY_HASH, &params),
            explorer.proxy(TX_RECEIPT, &params),
        )?;

        match &tx {
            Value::Null => {
                return Ok(json!({
                    "txHash": tx_hash,
                    "status": "not_found",
                    "message": "Transaction not found",
                }))
            }
            Value::Object(_) => {}
            other => bail!("unexpected transaction payload: {}", other),
        }

        let receipt = receipt.as_object();
        let succeeded = receipt.map(|r| r.get("status").and_then(Value::as_str) == Some(RECEIPT_SUCCESS));
        let status = match succeeded {
            Some(true) => "success",
            Some(false) => "failed",
            None => "pending",
        };

        let gas_price = format::parse_hex_u256(field(&tx, "gasPrice")?)?;
        let gas_used = match receipt.and_then(|r| r.get("gasUsed")).and_then(Value::as_str) {
            Some(hex) => Some(format::parse_hex_u64(hex)?),
            None => None,
        };

        Ok(json!({
            "txHash": tx_hash,
            "status": status,
            "details": {
                "blockNumber": optional_hex(&tx, "blockNumber")?,
                "blockHash": tx["blockHash"],
                "transactionIndex": optional_hex(&tx, "transactionIndex")?,
                "from": tx["from"],
                "to": tx["to"],
                "value": format::native_amount_from_hex(field(&tx, "value")?)?,
                "gasLimit": format::parse_hex_u64(field(&tx, "gas")?)?,
                "gasPrice": {
                    "wei": format::u256_json(gas_price),
                    "gwei": format::gwei_string(gas_price)?,
                },
                "gasUsed": gas_used,
                "success": succeeded,
            },
            "network": explorer.network(),
        }))
    }
    .boxed()
}

fn field<'v>(tx: &'v Value, key: &str) -> Result<&'v str> {
    match tx.get(key).and_then(Value::as_str) {
        Some(value) => Ok(value),
        None => bail!("transaction is missing '{}'", key),
    }
}

/// Hex field that is null while the transaction is pending.
fn optional_hex(tx: &Value, key: &str) -> Result<Option<u64>> {
    tx.get(key)
        .and_then(Value::as_str)
        .map(format::parse_hex_u64)
        .transpose()
}
