//! The tool catalog: every tool the server exposes, in `tools/list` order.

use serde_json::{json, Value};

use crate::blockchain::services::{
    balance, blocks, contract, fees, history, token, transactions, ToolHandler,
};
use crate::mcp::registry::Tool;

fn tool(
    name: &'static str,
    description: &'static str,
    action: &'static str,
    input_schema: Value,
    handler: ToolHandler,
) -> Tool {
    Tool::new(name, description, action, input_schema, handler)
}

fn no_arguments() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn single_string(key: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            key: { "type": "string", "description": description }
        },
        "required": [key]
    })
}

fn transfer_schema(subject: &str, contract_hint: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "address": { "type": "string", "description": format!("Address to get {} for", subject) },
            "contractAddress": { "type": "string", "description": contract_hint },
            "startBlock": { "type": "string", "description": "Starting block number (default: 0)" },
            "endBlock": { "type": "string", "description": "Ending block number (default: 99999999)" },
            "page": { "type": "string", "description": "Page number (default: 1)" },
            "offset": { "type": "string", "description": "Number of transfers per page (default: 10)" }
        },
        "required": ["address"]
    })
}

pub fn builtin_tools() -> Vec<Tool> {
    vec![
        tool(
            "getBalance",
            "Get ETH balance for any address",
            "fetching balance",
            single_string("address", "Ethereum address to check balance for"),
            balance::get_balance,
        ),
        tool(
            "getTransaction",
            "Get transaction details by hash",
            "fetching transaction",
            single_string("txHash", "Transaction hash to lookup"),
            transactions::get_transaction,
        ),
        tool(
            "getTransactionReceipt",
            "Get transaction receipt by hash",
            "fetching transaction receipt",
            single_string("txHash", "Transaction hash to get receipt for"),
            transactions::get_transaction_receipt,
        ),
        tool(
            "getBlock",
            "Get block information by number",
            "fetching block",
            json!({
                "type": "object",
                "properties": {
                    "blockNumber": {
                        "type": "string",
                        "description": "Block number (hex or decimal) or \"latest\""
                    }
                },
                "required": []
            }),
            blocks::get_block,
        ),
        tool(
            "getLatestBlock",
            "Get latest block number",
            "fetching latest block",
            no_arguments(),
            blocks::get_latest_block,
        ),
        tool(
            "getTransactionHistory",
            "Get transaction history for an address",
            "fetching transaction history",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Address to get transaction history for" },
                    "startBlock": { "type": "string", "description": "Starting block number" },
                    "endBlock": { "type": "string", "description": "Ending block number" },
                    "page": { "type": "string", "description": "Page number" },
                    "offset": { "type": "string", "description": "Number of transactions per page" }
                },
                "required": ["address"]
            }),
            history::get_transaction_history,
        ),
        tool(
            "getContractAbi",
            "Get ABI for a contract address",
            "fetching contract ABI",
            single_string("address", "Contract address to get ABI for"),
            contract::get_contract_abi,
        ),
        tool(
            "getTokenBalance",
            "Get token balance for an address",
            "fetching token balance",
            json!({
                "type": "object",
                "properties": {
                    "contractAddress": { "type": "string", "description": "Token contract address" },
                    "address": { "type": "string", "description": "Address to check token balance for" }
                },
                "required": ["contractAddress", "address"]
            }),
            token::get_token_balance,
        ),
        tool(
            "getGasPrice",
            "Get current gas price",
            "fetching gas price",
            no_arguments(),
            fees::get_gas_price,
        ),
        tool(
            "getEthSupply",
            "Get total ETH supply on Arbitrum",
            "fetching ETH supply",
            no_arguments(),
            balance::get_eth_supply,
        ),
        tool(
            "validateAddress",
            "Validate Ethereum address format",
            "validating address",
            single_string("address", "Address to validate"),
            contract::validate_address,
        ),
        tool(
            "getMultiBalance",
            "Get ETH balances for multiple addresses at once",
            "fetching multi balance",
            json!({
                "type": "object",
                "properties": {
                    "addresses": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of Ethereum addresses to check balances for"
                    }
                },
                "required": ["addresses"]
            }),
            balance::get_multi_balance,
        ),
        tool(
            "getERC20Transfers",
            "Get ERC-20 token transfers for an address",
            "fetching ERC-20 transfers",
            transfer_schema("token transfers", "Optional: specific token contract address"),
            history::get_erc20_transfers,
        ),
        tool(
            "getERC721Transfers",
            "Get ERC-721 (NFT) token transfers for an address",
            "fetching ERC-721 transfers",
            transfer_schema("NFT transfers", "Optional: specific NFT contract address"),
            history::get_erc721_transfers,
        ),
        tool(
            "getInternalTransactions",
            "Get internal transactions by address or transaction hash",
            "fetching internal transactions",
            json!({
                "type": "object",
                "properties": {
                    "address": { "type": "string", "description": "Address to get internal transactions for" },
                    "txHash": { "type": "string", "description": "Transaction hash to get internal transactions for" },
                    "startBlock": { "type": "string", "description": "Starting block number (default: 0)" },
                    "endBlock": { "type": "string", "description": "Ending block number (default: 99999999)" },
                    "page": { "type": "string", "description": "Page number (default: 1)" },
                    "offset": { "type": "string", "description": "Number of transactions per page (default: 10)" }
                },
                "required": []
            }),
            history::get_internal_transactions,
        ),
        tool(
            "getContractSource",
            "Get verified contract source code and ABI",
            "fetching contract source",
            single_string("address", "Contract address to get source code for"),
            contract::get_contract_source,
        ),
        tool(
            "getTokenInfo",
            "Get detailed information about a token contract",
            "fetching token info",
            single_string("contractAddress", "Token contract address to get info for"),
            token::get_token_info,
        ),
        tool(
            "getGasOracle",
            "Get gas price recommendations from Gas Oracle",
            "fetching gas oracle",
            no_arguments(),
            fees::get_gas_oracle,
        ),
        tool(
            "getTransactionStatus",
            "Get detailed transaction status and receipt",
            "fetching transaction status",
            single_string("txHash", "Transaction hash to get status for"),
            transactions::get_transaction_status,
        ),
        tool(
            "getContractCreation",
            "Get contract creation transaction details",
            "fetching contract creation",
            json!({
                "type": "object",
                "properties": {
                    "contractAddresses": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of contract addresses to get creation info for"
                    }
                },
                "required": ["contractAddresses"]
            }),
            contract::get_contract_creation,
        ),
        tool(
            "getAddressType",
            "Determine if an address is a contract or EOA (externally owned account)",
            "checking address type",
            single_string("address", "Address to check type for"),
            contract::get_address_type,
        ),
    ]
}
