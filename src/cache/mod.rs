//! Cache layer
//!
//! A thin policy layer over an externally-owned key-value store. The
//! store handles TTL expiry and eviction on its own; this layer only
//! adds canonical JSON serialization, deterministic key derivation, and
//! a hard per-entry size ceiling. Oversized values are never persisted:
//! the write is skipped with a diagnostic and the producing call simply
//! runs uncached.

mod layer;
mod memory;

pub use layer::{cache_key, CacheLayer, CachePolicy, MAX_ENTRY_CHARS};
pub use memory::MemoryCache;

use async_trait::async_trait;

/// The external key-value store collaborator.
///
/// String keys and values, TTL in seconds. Expiry and eviction are the
/// store's own business; both operations are assumed available and
/// infallible per the collaborator contract.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live entry, or nothing if absent/expired
    async fn get(&self, key: &str) -> Option<String>;

    /// Store an entry for `ttl_seconds`
    async fn put(&self, key: &str, value: &str, ttl_seconds: u32);
}

#[cfg(test)]
mod tests;
