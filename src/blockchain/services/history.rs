use anyhow::{anyhow, bail, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format::{self, DEFAULT_TOKEN_DECIMALS, MAX_DECIMALS};
use crate::blockchain::services::{field_str, result_array};
use crate::utils;

/// Block range and page window shared by the account list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub start_block: String,
    pub end_block: String,
    pub page: String,
    pub offset: String,
}

impl Paging {
    pub fn from_args(args: &Value) -> Self {
        Self {
            start_block: utils::str_or(args, "startBlock", "0"),
            end_block: utils::str_or(args, "endBlock", "99999999"),
            page: utils::str_or(args, "page", "1"),
            offset: utils::str_or(args, "offset", "10"),
        }
    }

    /// Query pairs, newest first.
    pub fn query(&self) -> [(&'static str, &str); 5] {
        [
            ("startblock", self.start_block.as_str()),
            ("endblock", self.end_block.as_str()),
            ("page", self.page.as_str()),
            ("offset", self.offset.as_str()),
            ("sort", "desc"),
        ]
    }
}

/// Normal transactions of an address, passed through unchanged.
pub fn get_transaction_history<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let paging = Paging::from_args(args);

        let mut query = vec![
            ("module", "account"),
            ("action", "txlist"),
            ("address", address.as_str()),
        ];
        query.extend(paging.query());
        Ok(explorer.fetch(&query).await?)
    }
    .boxed()
}

pub fn get_erc20_transfers<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let contract = utils::optional_str(args, "contractAddress");
        let body = fetch_transfers(explorer, "tokentx", &address, contract.as_deref(), args).await?;

        let transfers = result_array(&body)?
            .iter()
            .map(format_erc20_transfer)
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "address": address,
            "contractAddress": contract.as_deref().unwrap_or("All ERC-20 tokens"),
            "totalTransfers": transfers.len(),
            "transfers": transfers,
            "status": body["status"],
        }))
    }
    .boxed()
}

pub fn get_erc721_transfers<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::required_str(args, "address")?;
        let contract = utils::optional_str(args, "contractAddress");
        let body =
            fetch_transfers(explorer, "tokennfttx", &address, contract.as_deref(), args).await?;

        let transfers = result_array(&body)?
            .iter()
            .map(format_erc721_transfer)
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "address": address,
            "contractAddress": contract.as_deref().unwrap_or("All ERC-721 tokens"),
            "totalTransfers": transfers.len(),
            "transfers": transfers,
            "status": body["status"],
        }))
    }
    .boxed()
}

/// Internal transactions selected by address or, failing that, by hash.
pub fn get_internal_transactions<'a>(
    explorer: &'a ExplorerClient,
    args: &'a Value,
) -> BoxFuture<'a, Result<Value>> {
    async move {
        let address = utils::optional_str(args, "address");
        let tx_hash = utils::optional_str(args, "txHash");
        let (filter, query_type) = match (&address, &tx_hash) {
            (Some(address), _) => (("address", address.as_str()), "by_address"),
            (None, Some(hash)) => (("txhash", hash.as_str()), "by_transaction"),
            (None, None) => bail!("either 'address' or 'txHash' is required"),
        };
        let paging = Paging::from_args(args);

        let mut query = vec![("module", "account"), ("action", "txlistinternal")];
        query.extend(paging.query());
        query.push(filter);
        let body = explorer.fetch(&query).await?;

        let transactions = result_array(&body)?
            .iter()
            .map(format_internal_transaction)
            .collect::<Result<Vec<_>>>()?;

        Ok(json!({
            "queryType": query_type,
            "address": address,
            "txHash": tx_hash,
            "totalTransactions": transactions.len(),
            "transactions": transactions,
            "status": body["status"],
        }))
    }
    .boxed()
}

async fn fetch_transfers(
    explorer: &ExplorerClient,
    action: &str,
    address: &str,
    contract: Option<&str>,
    args: &Value,
) -> Result<Value> {
    let paging = Paging::from_args(args);
    let mut query = vec![("module", "account"), ("action", action), ("address", address)];
    query.extend(paging.query());
    if let Some(contract) = contract {
        query.push(("contractaddress", contract));
    }
    debug!(action, address, ?contract, "fetching transfer list");
    Ok(explorer.fetch(&query).await?)
}

fn as_record(entry: &Value) -> Result<Map<String, Value>> {
    entry
        .as_object()
        .cloned()
        .ok_or_else(|| anyhow!("unexpected list entry from explorer: {}", entry))
}

/// Common reshaping: ISO timestamp next to the raw one, numeric block number.
fn with_time_and_block(entry: &Value, record: &mut Map<String, Value>) -> Result<()> {
    let timestamp = format::unix_to_iso(field_str(entry, "timeStamp")?)?;
    let block_number = format::parse_u64(field_str(entry, "blockNumber")?)?;
    record.insert("timestamp".into(), json!(timestamp));
    record.insert("blockNumber".into(), json!(block_number));
    Ok(())
}

fn format_erc20_transfer(entry: &Value) -> Result<Value> {
    let mut record = as_record(entry)?;
    let decimals = entry
        .get("tokenDecimal")
        .and_then(Value::as_str)
        .and_then(|d| d.trim().parse::<u32>().ok())
        .filter(|d| *d <= MAX_DECIMALS)
        .unwrap_or(DEFAULT_TOKEN_DECIMALS);
    let amount = format::token_amount(field_str(entry, "value")?, decimals)?;

    record.insert(
        "formattedValue".into(),
        json!({
            "raw": amount.raw,
            "formatted": amount.formatted,
            "fullPrecision": amount.full_precision,
            "symbol": entry["tokenSymbol"],
        }),
    );
    with_time_and_block(entry, &mut record)?;
    Ok(Value::Object(record))
}

fn format_erc721_transfer(entry: &Value) -> Result<Value> {
    let mut record = as_record(entry)?;
    with_time_and_block(entry, &mut record)?;
    record.insert(
        "nftInfo".into(),
        json!({
            "name": entry["tokenName"],
            "symbol": entry["tokenSymbol"],
            "tokenId": entry["tokenID"],
        }),
    );
    Ok(Value::Object(record))
}

fn format_internal_transaction(entry: &Value) -> Result<Value> {
    let mut record = as_record(entry)?;
    with_time_and_block(entry, &mut record)?;
    record.insert(
        "formattedValue".into(),
        json!(format::native_amount(field_str(entry, "value")?)?),
    );
    record.insert(
        "success".into(),
        json!(entry.get("isError").and_then(Value::as_str) == Some("0")),
    );
    Ok(Value::Object(record))
}
