//! Faucet client configuration
//!
//! Constructed once at startup and passed explicitly to the components that
//! need it; nothing here is ambient or mutable at runtime.

use crate::error::{FaucetError, FaucetResult};
use serde::{Deserialize, Serialize};
use sokushuu_chain::{Address, PrivateEndpoints};

/// Faucet client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetClientConfig {
    /// Faucet backend base URI (claims go to `{base}/faucet/{chainId}`)
    pub backend_base_uri: String,

    /// The faucet's own public address, observed alongside the user's
    pub faucet_address: Address,

    /// Authenticated RPC endpoint for Pharos Testnet
    pub pharos_testnet_rpc_uri: String,

    /// Authenticated RPC endpoint for Pharos Devnet
    pub pharos_devnet_rpc_uri: String,
}

impl FaucetClientConfig {
    /// Load the configuration from environment variables.
    ///
    /// All four variables are required; a missing one is a startup error,
    /// not something the workflow can recover from later.
    pub fn from_env() -> FaucetResult<Self> {
        let backend_base_uri = require_env("BACKEND_BASE_URI")?;
        let faucet_address = require_env("FAUCET_PUBLIC_ADDRESS")?
            .parse()
            .map_err(|e| FaucetError::Config(format!("FAUCET_PUBLIC_ADDRESS: {}", e)))?;
        let pharos_testnet_rpc_uri = require_env("PHAROS_TESTNET_RPC_URI")?;
        let pharos_devnet_rpc_uri = require_env("PHAROS_DEVNET_RPC_URI")?;

        Ok(Self {
            backend_base_uri,
            faucet_address,
            pharos_testnet_rpc_uri,
            pharos_devnet_rpc_uri,
        })
    }

    /// The private endpoints consumed by the chain registry.
    pub fn private_endpoints(&self) -> PrivateEndpoints {
        PrivateEndpoints {
            pharos_testnet_rpc_uri: self.pharos_testnet_rpc_uri.clone(),
            pharos_devnet_rpc_uri: self.pharos_devnet_rpc_uri.clone(),
        }
    }
}

fn require_env(name: &str) -> FaucetResult<String> {
    std::env::var(name).map_err(|_| FaucetError::Config(format!("{} is not set", name)))
}
