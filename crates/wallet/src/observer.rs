//! Cached balance observation
//!
//! The observer sits between the workflow and a [`BalanceSource`]: resolved
//! balances are cached per `(chain, address)` key and served until the caller
//! invalidates that exact key. The observer is the sole writer of cached
//! values; callers only read and invalidate.

use crate::balance::Balance;
use crate::error::WalletResult;
use async_trait::async_trait;
use moka::future::Cache;
use sokushuu_chain::{Address, ChainId};
use std::sync::Arc;
use tracing::debug;

const MAX_CACHED_BALANCES: u64 = 1024;

/// Where balances actually come from. Implemented over JSON-RPC in
/// production; tests substitute a counting fake.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch(&self, chain: ChainId, address: &Address) -> WalletResult<Balance>;
}

/// Stable cache key for one observation stream.
///
/// Derived from the chain id and the lowercase address, so the same key is
/// produced no matter how the address was cased when entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BalanceKey {
    chain: ChainId,
    address: String,
}

impl BalanceKey {
    pub fn new(chain: ChainId, address: &Address) -> Self {
        Self {
            chain,
            address: address.canonical(),
        }
    }
}

/// Balance observer with an invalidation-driven cache.
pub struct BalanceObserver {
    source: Arc<dyn BalanceSource>,
    cache: Cache<BalanceKey, Balance>,
}

impl BalanceObserver {
    pub fn new(source: Arc<dyn BalanceSource>) -> Self {
        Self {
            source,
            cache: Cache::new(MAX_CACHED_BALANCES),
        }
    }

    /// Resolve the balance of `address` on `chain`.
    ///
    /// An unset address short-circuits to `Ok(None)` without touching the
    /// network. A fetch failure caches nothing, leaving the key in its
    /// not-yet-fetched state; retrying is the caller's decision.
    pub async fn observe(
        &self,
        chain: ChainId,
        address: Option<&Address>,
    ) -> WalletResult<Option<Balance>> {
        let Some(address) = address else {
            return Ok(None);
        };

        let key = BalanceKey::new(chain, address);
        if let Some(balance) = self.cache.get(&key).await {
            debug!("Balance cache hit for {:?}", key);
            return Ok(Some(balance));
        }

        let balance = self.source.fetch(chain, address).await?;
        self.cache.insert(key, balance.clone()).await;
        Ok(Some(balance))
    }

    /// Drop one cached entry so the next observation re-fetches it. Other
    /// keys, including in-flight observations, are unaffected.
    pub async fn invalidate(&self, key: &BalanceKey) {
        debug!("Invalidating balance cache for {:?}", key);
        self.cache.invalidate(key).await;
    }
}
