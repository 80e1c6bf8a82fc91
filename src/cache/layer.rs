//! Cache policy layer

use super::CacheStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Hard ceiling on the serialized size of any cached entry, in
/// characters. Larger values are recomputed on every call instead.
pub const MAX_ENTRY_CHARS: usize = 100_000;

/// Caching behavior for one cache-fronted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Entry lifetime in seconds; zero or below disables the read path
    pub ttl_seconds: i64,
    /// Whether a disabled read still refreshes the entry for later
    /// callers. On by default.
    pub write_when_disabled: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl_seconds: 43_200, // 12 hours
            write_when_disabled: true,
        }
    }
}

impl CachePolicy {
    /// A policy with the given TTL and default write behavior
    pub fn ttl(ttl_seconds: i64) -> Self {
        Self {
            ttl_seconds,
            ..Self::default()
        }
    }

    /// Whether the read path is active
    pub fn reads(&self) -> bool {
        self.ttl_seconds > 0
    }

    /// Whether the write path is active
    pub fn writes(&self) -> bool {
        self.ttl_seconds > 0 || self.write_when_disabled
    }

    /// The TTL handed to the store: padded by one second so the entry
    /// outlives the full requested window
    pub fn store_ttl(&self) -> u32 {
        self.ttl_seconds.max(0) as u32 + 1
    }
}

/// Derive a deterministic cache key from a namespace and the source
/// coordinates it guards
pub fn cache_key(namespace: &str, source: &str, table: &str) -> String {
    format!("{namespace}-{source}-{table}")
}

/// Policy wrapper around a [`CacheStore`]
#[derive(Clone)]
pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
}

impl CacheLayer {
    /// Create a cache layer over the given store
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read and deserialize an entry. A hit short-circuits the producing
    /// computation entirely; a corrupt entry counts as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "loaded from cache");
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cache entry");
                None
            }
        }
    }

    /// Serialize and store an entry, honoring the size ceiling.
    ///
    /// Returns whether the value was persisted. An oversized value is
    /// skipped and logged; the caller proceeds with its computed value.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, policy: &CachePolicy) -> bool {
        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                warn!(key, error = %e, "value not serializable, skipping cache write");
                return false;
            }
        };

        if serialized.len() > MAX_ENTRY_CHARS {
            warn!(
                key,
                length = serialized.len(),
                "too large to cache, will be recomputed every call"
            );
            return false;
        }

        debug!(key, length = serialized.len(), "caching");
        self.store.put(key, &serialized, policy.store_ttl()).await;
        true
    }
}

impl std::fmt::Debug for CacheLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer").finish_non_exhaustive()
    }
}
