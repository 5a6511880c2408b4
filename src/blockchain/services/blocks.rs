use anyhow::{anyhow, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format;
use crate::utils;

/// Full block (with transactions) by number or tag, passed through.
pub fn get_block<'a>(explorer: &'a ExplorerClient, args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let tag = block_tag(&utils::str_or(args, "blockNumber", "latest"))?;
        let body = explorer
            .fetch(&[
                ("module", "proxy"),
                ("action", "eth_getBlockByNumber"),
                ("tag", tag.as_str()),
                ("boolean", "true"),
            ])
            .await?;
        Ok(body)
    }
    .boxed()
}

pub fn get_latest_block<'a>(explorer: &'a ExplorerClient, _args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let result = explorer.proxy("eth_blockNumber", &[]).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| anyhow!("unexpected eth_blockNumber result: {}", result))?;

        Ok(json!({
            "latestBlockNumber": hex,
            "latestBlockDecimal": format::parse_hex_u64(hex)?,
        }))
    }
    .boxed()
}

/// The proxy API wants hex block numbers; decimal input is converted, named
/// tags and hex pass through.
fn block_tag(input: &str) -> Result<String> {
    if input.bytes().all(|b| b.is_ascii_digit()) {
        let number = format::parse_u64(input)?;
        return Ok(format!("0x{:x}", number));
    }
    Ok(input.to_string())
}
