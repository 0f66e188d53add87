//! JSON-RPC balance source
//!
//! One HTTP client shared across every configured network; the endpoint map
//! is built from the registry, unlisted chains included, so the transport can
//! route any chain the registry knows about.

use crate::balance::Balance;
use crate::error::{WalletError, WalletResult};
use crate::observer::BalanceSource;
use async_trait::async_trait;
use sokushuu_chain::{Address, ChainId, ChainRegistry};
use std::collections::HashMap;
use tracing::debug;

struct Endpoint {
    rpc_http_uri: String,
    currency_symbol: String,
}

/// Resolves balances with `eth_getBalance` against each chain's RPC endpoint.
pub struct RpcBalanceSource {
    endpoints: HashMap<ChainId, Endpoint>,
    client: reqwest::Client,
}

impl RpcBalanceSource {
    pub fn new(registry: &ChainRegistry) -> Self {
        let endpoints = registry
            .all()
            .iter()
            .map(|entry| {
                (
                    entry.id,
                    Endpoint {
                        rpc_http_uri: entry.rpc_http_uri.clone(),
                        currency_symbol: entry.currency_symbol.clone(),
                    },
                )
            })
            .collect();
        Self {
            endpoints,
            client: reqwest::Client::new(),
        }
    }

    async fn call(
        &self,
        rpc_http_uri: &str,
        method: &str,
        params: serde_json::Value,
    ) -> WalletResult<serde_json::Value> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let response = self
            .client
            .post(rpc_http_uri)
            .json(&payload)
            .send()
            .await
            .map_err(|e| WalletError::Rpc(format!("Request failed: {}", e)))?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WalletError::Rpc(format!("Invalid response: {}", e)))?;

        if let Some(error) = json.get("error") {
            return Err(WalletError::Rpc(error.to_string()));
        }

        Ok(json
            .get("result")
            .cloned()
            .unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl BalanceSource for RpcBalanceSource {
    async fn fetch(&self, chain: ChainId, address: &Address) -> WalletResult<Balance> {
        let endpoint = self
            .endpoints
            .get(&chain)
            .ok_or(WalletError::UnknownChain(chain))?;

        debug!("Fetching balance of {} on chain {}", address, chain);
        let result = self
            .call(
                &endpoint.rpc_http_uri,
                "eth_getBalance",
                serde_json::json!([address.canonical(), "latest"]),
            )
            .await?;

        let quantity = result
            .as_str()
            .ok_or_else(|| WalletError::MalformedQuantity(result.to_string()))?;
        let amount = parse_hex_quantity(quantity)?;

        Ok(Balance::new(amount, endpoint.currency_symbol.clone()))
    }
}

/// Parse a `0x`-prefixed hex quantity as returned by `eth_getBalance`.
fn parse_hex_quantity(quantity: &str) -> WalletResult<u128> {
    let hex = quantity
        .strip_prefix("0x")
        .ok_or_else(|| WalletError::MalformedQuantity(quantity.to_string()))?;
    u128::from_str_radix(hex, 16).map_err(|_| WalletError::MalformedQuantity(quantity.to_string()))
}
