//! Tool scenarios against a mock explorer API.
//!
//! All tests share one mockito server, so every mock matches on a query value
//! that no other test uses.

use arbitrum_mcp_server::{config::Config, AppState};
use mockito::{mock, server_url, Matcher, Mock};
use serde_json::{json, Value};

fn state() -> AppState {
    let config = Config {
        explorer_api_url: format!("{}/api", server_url()),
        explorer_api_key: "test-key".into(),
        ..Default::default()
    };
    AppState::new(config).unwrap()
}

fn explorer_mock(params: &[(&str, &str)], body: Value) -> Mock {
    let matchers = params
        .iter()
        .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
        .chain(std::iter::once(Matcher::UrlEncoded("apikey".into(), "test-key".into())))
        .collect();
    mock("GET", "/api")
        .match_query(Matcher::AllOf(matchers))
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

/// Run a tool and return its text output.
async fn call(name: &str, arguments: Value) -> String {
    let state = state();
    let result = state
        .registry
        .call(&state.explorer, Some(&json!({ "name": name, "arguments": arguments })))
        .await
        .unwrap();
    result.first_text().unwrap().to_string()
}

async fn call_json(name: &str, arguments: Value) -> Value {
    let text = call(name, arguments).await;
    serde_json::from_str(&text).unwrap_or_else(|_| panic!("not JSON: {}", text))
}

fn abi_string(text: &str) -> String {
    let mut data = hex::encode(text);
    while data.len() % 64 != 0 {
        data.push('0');
    }
    format!("0x{:064x}{:064x}{}", 32, text.len(), data)
}

#[tokio::test]
async fn gas_price_is_converted() {
    let _m = explorer_mock(
        &[("module", "proxy"), ("action", "eth_gasPrice")],
        json!({ "jsonrpc": "2.0", "id": 73, "result": "0x3b9aca00" }),
    );

    let out = call_json("getGasPrice", json!({})).await;
    assert_eq!(out["gasPriceHex"], "0x3b9aca00");
    assert_eq!(out["gasPriceWei"], 1_000_000_000u64);
    assert_eq!(out["gasPriceGwei"], "1.00");
}

#[tokio::test]
async fn balance_is_formatted() {
    let address = "0x00000000000000000000000000000000000000b1";
    let _m = explorer_mock(
        &[("module", "account"), ("action", "balance"), ("address", address)],
        json!({ "status": "1", "message": "OK", "result": "1500000000000000000" }),
    );

    let out = call_json("getBalance", json!({ "address": address })).await;
    assert_eq!(out["address"], address);
    assert_eq!(out["balance"]["wei"], "1500000000000000000");
    assert_eq!(out["balance"]["eth"], "1.500000");
    assert_eq!(out["balance"]["formatted"], "1.5 ETH");
    assert_eq!(out["network"], "Arbitrum");
}

#[tokio::test]
async fn explorer_error_body_becomes_error_text() {
    let address = "0x00000000000000000000000000000000000000b2";
    let _m = explorer_mock(
        &[("action", "balance"), ("address", address)],
        json!({ "status": "0", "message": "NOTOK", "result": "Invalid API Key" }),
    );

    let text = call("getBalance", json!({ "address": address })).await;
    assert_eq!(text, "Error fetching balance: NOTOK: Invalid API Key");
}

#[tokio::test]
async fn http_failure_becomes_error_text() {
    let address = "0x00000000000000000000000000000000000000b3";
    let _m = mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("address".into(), address.into()))
        .with_status(500)
        .create();

    let text = call("getBalance", json!({ "address": address })).await;
    assert_eq!(text, "Error fetching balance: Request failed with status code 500");
}

#[tokio::test]
async fn multi_balance_accepts_arrays() {
    let a = "0x00000000000000000000000000000000000000c1";
    let b = "0x00000000000000000000000000000000000000c2";
    let joined = format!("{},{}", a, b);
    let _m = explorer_mock(
        &[("action", "balancemulti"), ("address", joined.as_str())],
        json!({
            "status": "1",
            "message": "OK",
            "result": [
                { "account": a, "balance": "0" },
                { "account": b, "balance": "250000000000000000" }
            ]
        }),
    );

    let out = call_json("getMultiBalance", json!({ "addresses": [a, b] })).await;
    assert_eq!(out["totalAddresses"], 2);
    assert_eq!(out["balances"][0]["balance"]["formatted"], "0 ETH");
    assert_eq!(out["balances"][1]["balance"]["eth"], "0.250000");
}

#[tokio::test]
async fn transaction_status_not_found() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000a1";
    let _tx = explorer_mock(
        &[("action", "eth_getTransactionByHash"), ("txhash", hash)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": null }),
    );
    let _receipt = explorer_mock(
        &[("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": null }),
    );

    let out = call_json("getTransactionStatus", json!({ "txHash": hash })).await;
    assert_eq!(
        out,
        json!({ "txHash": hash, "status": "not_found", "message": "Transaction not found" })
    );
}

#[tokio::test]
async fn transaction_status_success() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000a2";
    let _tx = explorer_mock(
        &[("action", "eth_getTransactionByHash"), ("txhash", hash)],
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "blockNumber": "0x10",
                "blockHash": "0xb10c",
                "transactionIndex": "0x1",
                "from": "0x00000000000000000000000000000000000000f1",
                "to": "0x00000000000000000000000000000000000000f2",
                "value": "0xde0b6b3a7640000",
                "gas": "0x5208",
                "gasPrice": "0x3b9aca00"
            }
        }),
    );
    let _receipt = explorer_mock(
        &[("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": { "status": "0x1", "gasUsed": "0x5208" } }),
    );

    let out = call_json("getTransactionStatus", json!({ "txHash": hash })).await;
    assert_eq!(out["status"], "success");
    let details = &out["details"];
    assert_eq!(details["blockNumber"], 16);
    assert_eq!(details["transactionIndex"], 1);
    assert_eq!(details["gasLimit"], 21000);
    assert_eq!(details["gasUsed"], 21000);
    assert_eq!(details["gasPrice"]["gwei"], "1.00");
    assert_eq!(details["value"]["formatted"], "1 ETH");
    assert_eq!(details["success"], true);
}

#[tokio::test]
async fn transaction_status_pending_without_receipt() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000a3";
    let _tx = explorer_mock(
        &[("action", "eth_getTransactionByHash"), ("txhash", hash)],
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "blockNumber": null,
                "blockHash": null,
                "transactionIndex": null,
                "from": "0x00000000000000000000000000000000000000f1",
                "to": null,
                "value": "0x0",
                "gas": "0x5208",
                "gasPrice": "0x1"
            }
        }),
    );
    let _receipt = explorer_mock(
        &[("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": null }),
    );

    let out = call_json("getTransactionStatus", json!({ "txHash": hash })).await;
    assert_eq!(out["status"], "pending");
    assert_eq!(out["details"]["blockNumber"], Value::Null);
    assert_eq!(out["details"]["success"], Value::Null);
}

#[tokio::test]
async fn token_balance_uses_contract_metadata() {
    let token = "0x00000000000000000000000000000000000000d1";
    let holder = "0x00000000000000000000000000000000000000d2";
    let _balance = explorer_mock(
        &[("action", "tokenbalance"), ("contractaddress", token), ("address", holder)],
        json!({ "status": "1", "message": "OK", "result": "2500000" }),
    );
    let _decimals = explorer_mock(
        &[("action", "eth_call"), ("to", token), ("data", "0x313ce567")],
        json!({ "jsonrpc": "2.0", "id": 1, "result": format!("0x{:064x}", 6) }),
    );
    let _name = explorer_mock(
        &[("action", "eth_call"), ("to", token), ("data", "0x06fdde03")],
        json!({ "jsonrpc": "2.0", "id": 1, "result": abi_string("USD Coin") }),
    );
    let _symbol = explorer_mock(
        &[("action", "eth_call"), ("to", token), ("data", "0x95d89b41")],
        json!({ "jsonrpc": "2.0", "id": 1, "result": abi_string("USDC") }),
    );

    let out = call_json(
        "getTokenBalance",
        json!({ "contractAddress": token, "address": holder }),
    )
    .await;
    assert_eq!(out["tokenInfo"], json!({ "name": "USD Coin", "symbol": "USDC", "decimals": 6 }));
    assert_eq!(out["balance"]["raw"], "2500000");
    assert_eq!(out["balance"]["formatted"], "2.500000");
    assert_eq!(out["balance"]["fullPrecision"], "2.5");
}

#[tokio::test]
async fn token_info_falls_back_to_defaults() {
    let token = "0x00000000000000000000000000000000000000d3";
    let _supply = explorer_mock(
        &[("module", "stats"), ("action", "tokensupply"), ("contractaddress", token)],
        json!({ "status": "1", "message": "OK", "result": "1000000000000000000000" }),
    );
    let _calls = explorer_mock(
        &[("action", "eth_call"), ("to", token)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" }),
    );

    let out = call_json("getTokenInfo", json!({ "contractAddress": token })).await;
    let info = &out["tokenInfo"];
    assert_eq!(info["name"], "Unknown Token");
    assert_eq!(info["symbol"], "UNKNOWN");
    assert_eq!(info["decimals"], 18);
    assert_eq!(info["totalSupply"]["fullPrecision"], "1000");
}

#[tokio::test]
async fn erc20_transfers_are_reshaped() {
    let holder = "0x00000000000000000000000000000000000000e1";
    let _m = explorer_mock(
        &[
            ("action", "tokentx"),
            ("address", holder),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("page", "1"),
            ("offset", "10"),
            ("sort", "desc"),
        ],
        json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "blockNumber": "1000",
                "timeStamp": "1704067200",
                "hash": "0xfeed",
                "value": "1234500000000000000",
                "tokenSymbol": "ARB",
                "tokenDecimal": "18"
            }]
        }),
    );

    let out = call_json("getERC20Transfers", json!({ "address": holder })).await;
    assert_eq!(out["contractAddress"], "All ERC-20 tokens");
    assert_eq!(out["totalTransfers"], 1);
    let transfer = &out["transfers"][0];
    assert_eq!(transfer["timestamp"], "2024-01-01T00:00:00.000Z");
    assert_eq!(transfer["blockNumber"], 1000);
    assert_eq!(transfer["formattedValue"]["formatted"], "1.234500");
    assert_eq!(transfer["formattedValue"]["fullPrecision"], "1.2345");
    assert_eq!(transfer["formattedValue"]["symbol"], "ARB");
}

#[tokio::test]
async fn internal_transactions_prefer_address() {
    let holder = "0x00000000000000000000000000000000000000e2";
    let _m = explorer_mock(
        &[("action", "txlistinternal"), ("address", holder)],
        json!({ "status": "0", "message": "No transactions found", "result": [] }),
    );

    let out = call_json(
        "getInternalTransactions",
        json!({ "address": holder, "txHash": "0xignored" }),
    )
    .await;
    assert_eq!(out["queryType"], "by_address");
    assert_eq!(out["totalTransactions"], 0);
}

#[tokio::test]
async fn internal_transactions_need_a_filter() {
    let text = call("getInternalTransactions", json!({})).await;
    assert_eq!(
        text,
        "Error fetching internal transactions: either 'address' or 'txHash' is required"
    );
}

#[tokio::test]
async fn address_type_detects_contracts() {
    let address = "0x00000000000000000000000000000000000000f3";
    let _m = explorer_mock(
        &[("action", "eth_getCode"), ("address", address), ("tag", "latest")],
        json!({ "jsonrpc": "2.0", "id": 1, "result": "0x60806040" }),
    );

    let out = call_json("getAddressType", json!({ "address": address })).await;
    assert_eq!(
        out["addressType"],
        json!({ "type": "contract", "description": "Smart Contract", "hasCode": true, "codeSize": 4 })
    );
    assert_eq!(out["network"], "Arbitrum");
}

#[tokio::test]
async fn contract_source_is_summarized() {
    let address = "0x00000000000000000000000000000000000000f4";
    let _m = explorer_mock(
        &[("action", "getsourcecode"), ("address", address)],
        json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "SourceCode": "contract A {}",
                "ABI": "[{\"type\":\"fallback\"}]",
                "ContractName": "A",
                "CompilerVersion": "v0.8.19+commit.7dd6d404",
                "OptimizationUsed": "1",
                "Runs": "200",
                "ConstructorArguments": "",
                "EVMVersion": "Default",
                "Library": "",
                "LicenseType": "MIT",
                "Proxy": "0",
                "Implementation": "",
                "SwarmSource": ""
            }]
        }),
    );

    let out = call_json("getContractSource", json!({ "address": address })).await;
    let info = &out["contractInfo"];
    assert_eq!(info["name"], "A");
    assert_eq!(info["optimized"], true);
    assert_eq!(info["isProxy"], false);
    assert_eq!(info["implementation"], Value::Null);
    assert_eq!(out["abi"], json!([{ "type": "fallback" }]));
    assert_eq!(out["sourceCode"], "contract A {}");
}

#[tokio::test]
async fn contract_creation_maps_each_contract() {
    let address = "0x00000000000000000000000000000000000000f5";
    let _m = explorer_mock(
        &[("action", "getcontractcreation"), ("contractaddresses", address)],
        json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "contractAddress": address,
                "contractCreator": "0x00000000000000000000000000000000000000f6",
                "txHash": "0xc0ffee"
            }]
        }),
    );

    let out = call_json("getContractCreation", json!({ "contractAddresses": [address] })).await;
    assert_eq!(out["totalContracts"], 1);
    let entry = &out["contracts"][0];
    assert_eq!(entry["creatorAddress"], "0x00000000000000000000000000000000000000f6");
    assert_eq!(entry["creationDetails"]["transactionHash"], "0xc0ffee");
}

#[tokio::test]
async fn gas_oracle_tiers() {
    let _m = explorer_mock(
        &[("module", "gastracker"), ("action", "gasoracle")],
        json!({
            "status": "1",
            "message": "OK",
            "result": {
                "LastBlock": "1",
                "SafeGasPrice": "0.01",
                "ProposeGasPrice": "0.01",
                "FastGasPrice": "0.02",
                "suggestBaseFee": "0.01",
                "gasUsedRatio": "0.5"
            }
        }),
    );

    let out = call_json("getGasOracle", json!({})).await;
    assert_eq!(out["gasOracle"]["fast"]["wei"], 20_000_000);
    assert_eq!(out["gasOracle"]["safe"]["estimatedTime"], "Slow (>10 minutes)");
    assert_eq!(out["status"], "1");
}

#[tokio::test]
async fn eth_supply_in_ether() {
    let _m = explorer_mock(
        &[("module", "stats"), ("action", "ethsupply")],
        json!({ "status": "1", "message": "OK", "result": "120000000555000000000000000" }),
    );

    let out = call_json("getEthSupply", json!({})).await;
    assert_eq!(out["totalSupply"], "120000000555000000000000000");
    assert_eq!(out["totalSupplyInEth"], "120000000.56");
}

#[tokio::test]
async fn address_type_fails_when_explorer_rejects_the_key() {
    let address = "0x00000000000000000000000000000000000000f7";
    let _m = explorer_mock(
        &[("action", "eth_getCode"), ("address", address)],
        json!({ "status": "0", "message": "NOTOK", "result": "Invalid API Key" }),
    );

    let text = call("getAddressType", json!({ "address": address })).await;
    assert_eq!(text, "Error checking address type: NOTOK: Invalid API Key");
}

#[tokio::test]
async fn transaction_status_fails_when_receipt_is_rate_limited() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000a4";
    let _tx = explorer_mock(
        &[("action", "eth_getTransactionByHash"), ("txhash", hash)],
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "blockNumber": "0x10",
                "blockHash": "0xb10c",
                "transactionIndex": "0x0",
                "from": "0x00000000000000000000000000000000000000f1",
                "to": "0x00000000000000000000000000000000000000f2",
                "value": "0x0",
                "gas": "0x5208",
                "gasPrice": "0x1"
            }
        }),
    );
    let _receipt = explorer_mock(
        &[("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        json!({ "status": "0", "message": "NOTOK", "result": "Max rate limit reached" }),
    );

    let text = call("getTransactionStatus", json!({ "txHash": hash })).await;
    assert_eq!(
        text,
        "Error fetching transaction status: NOTOK: Max rate limit reached"
    );
}

#[tokio::test]
async fn transaction_status_surfaces_rpc_errors() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000a5";
    let _tx = explorer_mock(
        &[("action", "eth_getTransactionByHash"), ("txhash", hash)],
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "invalid argument 0: hex string has odd length" }
        }),
    );
    let _receipt = explorer_mock(
        &[("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        json!({ "jsonrpc": "2.0", "id": 1, "result": null }),
    );

    let text = call("getTransactionStatus", json!({ "txHash": hash })).await;
    assert_eq!(
        text,
        "Error fetching transaction status: explorer RPC error -32602: invalid argument 0: hex string has odd length"
    );
}

#[tokio::test]
async fn token_info_fails_when_metadata_calls_are_rejected() {
    let token = "0x00000000000000000000000000000000000000d4";
    let _supply = explorer_mock(
        &[("action", "tokensupply"), ("contractaddress", token)],
        json!({ "status": "1", "message": "OK", "result": "1000" }),
    );
    let _calls = explorer_mock(
        &[("action", "eth_call"), ("to", token)],
        json!({ "status": "0", "message": "NOTOK", "result": "Invalid API Key" }),
    );

    let text = call("getTokenInfo", json!({ "contractAddress": token })).await;
    assert_eq!(text, "Error fetching token info: NOTOK: Invalid API Key");
}

#[tokio::test]
async fn token_metadata_reverts_fall_back_to_defaults() {
    let token = "0x00000000000000000000000000000000000000d5";
    let holder = "0x00000000000000000000000000000000000000d6";
    let _balance = explorer_mock(
        &[("action", "tokenbalance"), ("contractaddress", token), ("address", holder)],
        json!({ "status": "1", "message": "OK", "result": "5" }),
    );
    let _calls = explorer_mock(
        &[("action", "eth_call"), ("to", token)],
        json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": -32000, "message": "execution reverted" } }),
    );

    let out = call_json(
        "getTokenBalance",
        json!({ "contractAddress": token, "address": holder }),
    )
    .await;
    assert_eq!(
        out["tokenInfo"],
        json!({ "name": "Unknown Token", "symbol": "UNKNOWN", "decimals": 18 })
    );
}

#[tokio::test]
async fn transaction_is_passed_through() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000b1";
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": { "hash": hash, "nonce": "0x2" } });
    let _m = explorer_mock(
        &[("module", "proxy"), ("action", "eth_getTransactionByHash"), ("txhash", hash)],
        body.clone(),
    );

    assert_eq!(call_json("getTransaction", json!({ "txHash": hash })).await, body);
}

#[tokio::test]
async fn receipt_is_passed_through() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000b2";
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": { "status": "0x1", "logs": [] } });
    let _m = explorer_mock(
        &[("module", "proxy"), ("action", "eth_getTransactionReceipt"), ("txhash", hash)],
        body.clone(),
    );

    assert_eq!(call_json("getTransactionReceipt", json!({ "txHash": hash })).await, body);
}

#[tokio::test]
async fn block_by_decimal_number_is_queried_as_hex() {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": { "number": "0x7a120" } });
    let _m = explorer_mock(
        &[
            ("module", "proxy"),
            ("action", "eth_getBlockByNumber"),
            ("tag", "0x7a120"),
            ("boolean", "true"),
        ],
        body.clone(),
    );

    assert_eq!(call_json("getBlock", json!({ "blockNumber": "500000" })).await, body);
}

#[tokio::test]
async fn block_defaults_to_latest() {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": { "number": "0x1", "marker": "latest-block" } });
    let _m = explorer_mock(
        &[("action", "eth_getBlockByNumber"), ("tag", "latest"), ("boolean", "true")],
        body.clone(),
    );

    assert_eq!(call_json("getBlock", json!({})).await, body);
}

#[tokio::test]
async fn latest_block_number_in_hex_and_decimal() {
    let _m = explorer_mock(
        &[("module", "proxy"), ("action", "eth_blockNumber")],
        json!({ "jsonrpc": "2.0", "id": 83, "result": "0x8f0d180" }),
    );

    let out = call_json("getLatestBlock", json!({})).await;
    assert_eq!(out, json!({ "latestBlockNumber": "0x8f0d180", "latestBlockDecimal": 150000000 }));
}

#[tokio::test]
async fn transaction_history_uses_paging() {
    let holder = "0x00000000000000000000000000000000000000e3";
    let body = json!({ "status": "1", "message": "OK", "result": [{ "hash": "0x1" }] });
    let _m = explorer_mock(
        &[
            ("module", "account"),
            ("action", "txlist"),
            ("address", holder),
            ("startblock", "100"),
            ("endblock", "200"),
            ("page", "2"),
            ("offset", "5"),
            ("sort", "desc"),
        ],
        body.clone(),
    );

    let out = call_json(
        "getTransactionHistory",
        json!({ "address": holder, "startBlock": "100", "endBlock": 200, "page": "2", "offset": "5" }),
    )
    .await;
    assert_eq!(out, body);
}

#[tokio::test]
async fn contract_abi_is_passed_through() {
    let address = "0x00000000000000000000000000000000000000f8";
    let body = json!({ "status": "1", "message": "OK", "result": "[{\"type\":\"constructor\"}]" });
    let _m = explorer_mock(
        &[("module", "contract"), ("action", "getabi"), ("address", address)],
        body.clone(),
    );

    assert_eq!(call_json("getContractAbi", json!({ "address": address })).await, body);
}

#[tokio::test]
async fn erc721_transfers_filter_by_contract() {
    let holder = "0x00000000000000000000000000000000000000e4";
    let collection = "0x00000000000000000000000000000000000000e5";
    let _m = explorer_mock(
        &[
            ("module", "account"),
            ("action", "tokennfttx"),
            ("address", holder),
            ("contractaddress", collection),
            ("sort", "desc"),
        ],
        json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "blockNumber": "77",
                "timeStamp": "1704067200",
                "tokenID": "42",
                "tokenName": "Smol Brains",
                "tokenSymbol": "SMOL"
            }]
        }),
    );

    let out = call_json(
        "getERC721Transfers",
        json!({ "address": holder, "contractAddress": collection }),
    )
    .await;
    assert_eq!(out["contractAddress"], collection);
    assert_eq!(out["totalTransfers"], 1);
    let transfer = &out["transfers"][0];
    assert_eq!(transfer["nftInfo"], json!({ "name": "Smol Brains", "symbol": "SMOL", "tokenId": "42" }));
    assert_eq!(transfer["blockNumber"], 77);
    assert_eq!(transfer["timestamp"], "2024-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn internal_transactions_by_hash() {
    let hash = "0x00000000000000000000000000000000000000000000000000000000000000c3";
    let _m = explorer_mock(
        &[("action", "txlistinternal"), ("txhash", hash)],
        json!({
            "status": "1",
            "message": "OK",
            "result": [{
                "blockNumber": "9",
                "timeStamp": "1704067200",
                "value": "1000000000000000000",
                "isError": "0"
            }]
        }),
    );

    let out = call_json("getInternalTransactions", json!({ "txHash": hash })).await;
    assert_eq!(out["queryType"], "by_transaction");
    assert_eq!(out["txHash"], hash);
    assert_eq!(out["address"], Value::Null);
    assert_eq!(out["totalTransactions"], 1);
    assert_eq!(out["transactions"][0]["success"], true);
    assert_eq!(out["transactions"][0]["formattedValue"]["formatted"], "1 ETH");
}
