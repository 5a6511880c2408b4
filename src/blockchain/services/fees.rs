use anyhow::{anyhow, Result};
use ethers_core::types::U256;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};

use crate::blockchain::client::ExplorerClient;
use crate::blockchain::format::{self, GWEI_DECIMALS};
use crate::blockchain::models::GasOracle;

/// Current gas price from `eth_gasPrice`.
pub fn get_gas_price<'a>(explorer: &'a ExplorerClient, _args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let result = explorer.proxy("eth_gasPrice", &[]).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| anyhow!("unexpected eth_gasPrice result: {}", result))?;
        let wei = format::parse_hex_u256(hex)?;

        Ok(json!({
            "gasPriceHex": hex,
            "gasPriceWei": format::u256_json(wei),
            "gasPriceGwei": format::gwei_string(wei)?,
        }))
    }
    .boxed()
}

/// Safe / standard / fast recommendations from the explorer's gas tracker.
pub fn get_gas_oracle<'a>(explorer: &'a ExplorerClient, _args: &'a Value) -> BoxFuture<'a, Result<Value>> {
    async move {
        let body = explorer
            .fetch(&[("module", "gastracker"), ("action", "gasoracle")])
            .await?;
        let oracle: GasOracle = serde_json::from_value(body["result"].clone())
            .map_err(|e| anyhow!("unexpected gas oracle result {}: {}", body["result"], e))?;

        Ok(json!({
            "gasOracle": {
                "safe": tier(&oracle.safe_gas_price, "Slow (>10 minutes)")?,
                "standard": tier(&oracle.propose_gas_price, "Standard (~3 minutes)")?,
                "fast": tier(&oracle.fast_gas_price, "Fast (<2 minutes)")?,
            },
            "network": explorer.network(),
            "status": body["status"],
        }))
    }
    .boxed()
}

fn tier(gwei: &str, estimated_time: &str) -> Result<Value> {
    let wei: U256 = format::parse_units(gwei, GWEI_DECIMALS)?;
    let gwei_number: f64 = gwei.trim().parse()?;
    Ok(json!({
        "gasPrice": gwei,
        "gwei": gwei_number,
        "wei": format::u256_json(wei),
        "estimatedTime": estimated_time,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_converts_gwei_to_wei() {
        let out = tier("0.01", "Fast (<2 minutes)").unwrap();
        assert_eq!(out["wei"], 10_000_000);
        assert_eq!(out["gwei"], 0.01);
        assert_eq!(out["gasPrice"], "0.01");
    }

    #[test]
    fn tier_rejects_non_numeric_prices() {
        assert!(tier("n/a", "Slow (>10 minutes)").is_err());
    }
}
