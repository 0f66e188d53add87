//! Error types for the wallet transport layer

use sokushuu_chain::ChainId;
use thiserror::Error;

/// Wallet transport errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("No RPC endpoint configured for chain {0}")]
    UnknownChain(ChainId),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Malformed balance quantity: {0}")]
    MalformedQuantity(String),
}

pub type WalletResult<T> = Result<T, WalletError>;
