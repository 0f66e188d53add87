//! Wallet transport layer for the Sokushuu faucet client
//!
//! Resolves native-currency balances for the supported networks:
//! - JSON-RPC `eth_getBalance` source over HTTP
//! - An observer caching results per `(chain, address)` key
//! - Explicit cache invalidation for post-claim refreshes

pub mod balance;
pub mod error;
pub mod observer;
pub mod rpc;

pub use balance::{format_amount, Balance};
pub use error::{WalletError, WalletResult};
pub use observer::{BalanceKey, BalanceObserver, BalanceSource};
pub use rpc::RpcBalanceSource;
