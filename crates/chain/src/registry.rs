//! Supported network registry
//!
//! Built once at startup from static values plus the configured private RPC
//! endpoints, then shared read-only with every consumer. Entry order is
//! declaration order and stable.

use crate::types::ChainId;
use serde::{Deserialize, Serialize};

/// Private RPC endpoints injected from configuration.
///
/// The two Pharos networks require authenticated endpoints, so their RPC URIs
/// are deployment inputs rather than static values.
#[derive(Debug, Clone)]
pub struct PrivateEndpoints {
    pub pharos_testnet_rpc_uri: String,
    pub pharos_devnet_rpc_uri: String,
}

/// Display and transport metadata for one supported network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainMetadata {
    /// Numeric chain id (unique key)
    pub id: ChainId,
    /// Human-readable network name
    pub name: String,
    /// Icon asset reference
    pub icon: String,
    /// Block explorer base URL
    pub block_explorer_uri: String,
    /// RPC endpoint used for balance reads
    pub rpc_http_uri: String,
    /// Native currency display symbol
    pub currency_symbol: String,
    /// Native currency decimals
    pub currency_decimals: u8,
    /// Whether the chain appears in the user-selectable list
    pub listed: bool,
}

impl ChainMetadata {
    /// Explorer link for a transaction hash.
    pub fn explorer_tx_uri(&self, tx_hash: &str) -> String {
        format!(
            "{}/tx/{}",
            self.block_explorer_uri.trim_end_matches('/'),
            tx_hash
        )
    }
}

/// Registry of all configured networks.
///
/// Resolves any configured chain id, listed or not; `list` exposes only the
/// user-selectable subset. No runtime mutation.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    entries: Vec<ChainMetadata>,
}

impl ChainRegistry {
    pub fn new(entries: Vec<ChainMetadata>) -> Self {
        Self { entries }
    }

    /// The production registry: Monad Testnet, EDU Chain Testnet and Pharos
    /// Testnet are selectable; Pharos Devnet is wired into the transport
    /// layer but hidden from the selection list.
    pub fn with_default_chains(endpoints: &PrivateEndpoints) -> Self {
        Self::new(vec![
            ChainMetadata {
                id: ChainId(10143),
                name: "Monad Testnet".to_string(),
                icon: "chain-monad.svg".to_string(),
                block_explorer_uri: "https://testnet.monadexplorer.com/".to_string(),
                rpc_http_uri: "https://testnet-rpc.monad.xyz".to_string(),
                currency_symbol: "MON".to_string(),
                currency_decimals: 18,
                listed: true,
            },
            ChainMetadata {
                id: ChainId(656476),
                name: "EDU Chain Testnet".to_string(),
                icon: "chain-edu.svg".to_string(),
                block_explorer_uri: "https://edu-chain-testnet.blockscout.com/".to_string(),
                rpc_http_uri: "https://rpc.open-campus-codex.gelato.digital".to_string(),
                currency_symbol: "EDU".to_string(),
                currency_decimals: 18,
                listed: true,
            },
            ChainMetadata {
                id: ChainId(688688),
                name: "Pharos Testnet".to_string(),
                icon: "chain-pharos.svg".to_string(),
                block_explorer_uri: "https://testnet.pharosscan.xyz/".to_string(),
                rpc_http_uri: endpoints.pharos_testnet_rpc_uri.clone(),
                currency_symbol: "PHRS".to_string(),
                currency_decimals: 18,
                listed: true,
            },
            ChainMetadata {
                id: ChainId(50002),
                name: "Pharos Devnet".to_string(),
                icon: "chain-pharos.svg".to_string(),
                block_explorer_uri: "https://devnet.pharosscan.xyz/".to_string(),
                rpc_http_uri: endpoints.pharos_devnet_rpc_uri.clone(),
                currency_symbol: "PTT".to_string(),
                currency_decimals: 18,
                listed: false,
            },
        ])
    }

    /// Resolve a chain id to its metadata, listed or not.
    pub fn metadata_for(&self, id: ChainId) -> Option<&ChainMetadata> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// User-selectable networks, in declaration order.
    pub fn list(&self) -> impl Iterator<Item = &ChainMetadata> {
        self.entries.iter().filter(|entry| entry.listed)
    }

    /// Every configured network, including unlisted ones.
    pub fn all(&self) -> &[ChainMetadata] {
        &self.entries
    }

    /// Default selection for a fresh workflow.
    pub fn first_listed(&self) -> Option<&ChainMetadata> {
        self.list().next()
    }
}
