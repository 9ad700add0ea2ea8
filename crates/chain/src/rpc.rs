//! Thin JSON-RPC provider over HTTP.
//!
//! Only the three methods the system needs: `eth_call`, `eth_blockNumber`
//! and `eth_getLogs`. Transport failures map to [`TradeError::Network`];
//! call reverts map to [`TradeError::ContractReverted`].

use alloy_primitives::{Address, B256, Bytes, hex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use synthswap_domain::prelude::TradeError;
use tracing::debug;

/// JSON-RPC revert error code.
const CODE_EXECUTION_REVERTED: i64 = 3;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// A raw `eth_getLogs` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(rename = "blockNumber")]
    block_number_hex: String,
    #[serde(rename = "transactionHash")]
    pub transaction_hash: B256,
}

impl RawLog {
    pub fn block_number(&self) -> Result<u64, TradeError> {
        parse_quantity(&self.block_number_hex)
    }
}

fn parse_quantity(hex_str: &str) -> Result<u64, TradeError> {
    let digits = hex_str.trim_start_matches("0x");
    u64::from_str_radix(digits, 16)
        .map_err(|_| TradeError::Network(format!("bad quantity '{hex_str}'")))
}

/// Shared HTTP JSON-RPC client.
pub struct RpcProvider {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, TradeError> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!(method, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TradeError::Network(e.to_string()))?;

        let parsed: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| TradeError::Network(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(if error.code == CODE_EXECUTION_REVERTED {
                TradeError::ContractReverted(error.message)
            } else {
                TradeError::classify_provider_message(&error.message)
            });
        }

        parsed
            .result
            .ok_or_else(|| TradeError::Network(format!("empty {method} response")))
    }

    /// `eth_call` against `to` with the given calldata, latest block.
    pub async fn call(&self, to: Address, calldata: Vec<u8>) -> Result<Vec<u8>, TradeError> {
        let data = hex::encode_prefixed(&calldata);
        let result: String = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        hex::decode(&result).map_err(|e| TradeError::Network(format!("bad call result: {e}")))
    }

    /// `eth_blockNumber`.
    pub async fn block_number(&self) -> Result<u64, TradeError> {
        let result: String = self.request("eth_blockNumber", json!([])).await?;
        parse_quantity(&result)
    }

    /// `eth_getLogs` for one address, with positional topic filters
    /// (OR within a position).
    pub async fn get_logs(
        &self,
        address: Address,
        topics: &[Vec<B256>],
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawLog>, TradeError> {
        let filter = json!([{
            "address": address,
            "topics": topics,
            "fromBlock": format!("{from_block:#x}"),
            "toBlock": format!("{to_block:#x}"),
        }]);
        self.request("eth_getLogs", filter).await
    }
}
