//! Tests for the cache layer

use super::*;
use serde_json::json;
use std::sync::Arc;

fn layer_and_store() -> (CacheLayer, Arc<MemoryCache>) {
    let store = Arc::new(MemoryCache::new());
    (CacheLayer::new(store.clone()), store)
}

#[test]
fn test_cache_key_is_deterministic() {
    assert_eq!(
        cache_key("lookup", "appX", "tblY"),
        "lookup-appX-tblY".to_string()
    );
    assert_eq!(
        cache_key("lookup", "appX", "tblY"),
        cache_key("lookup", "appX", "tblY")
    );
}

#[tokio::test]
async fn test_round_trip() {
    let (layer, _store) = layer_and_store();
    let value = json!({"r1": "A", "r2": "B"});

    let written = layer
        .put_json("lookup-a-b", &value, &CachePolicy::default())
        .await;
    assert!(written);

    let loaded: Option<serde_json::Value> = layer.get_json("lookup-a-b").await;
    assert_eq!(loaded, Some(value));
}

#[tokio::test]
async fn test_miss_returns_none() {
    let (layer, _store) = layer_and_store();
    let loaded: Option<serde_json::Value> = layer.get_json("nothing-here").await;
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_size_ceiling_skips_write() {
    let (layer, store) = layer_and_store();

    // 150,000 characters serialized: never persisted.
    let oversized = json!({"blob": "x".repeat(150_000)});
    let written = layer
        .put_json("big", &oversized, &CachePolicy::default())
        .await;

    assert!(!written);
    assert!(store.get("big").await.is_none());
}

#[tokio::test]
async fn test_value_at_ceiling_edge_is_cached() {
    let (layer, store) = layer_and_store();

    // Fits inside the ceiling including the JSON quotes.
    let value = json!("y".repeat(MAX_ENTRY_CHARS - 2));
    assert!(layer.put_json("edge", &value, &CachePolicy::default()).await);
    assert!(store.get("edge").await.is_some());
}

#[tokio::test]
async fn test_corrupt_entry_is_a_miss() {
    let (layer, store) = layer_and_store();
    store.put("mangled", "{not json", 60).await;

    let loaded: Option<serde_json::Value> = layer.get_json("mangled").await;
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_expired_entry_is_a_miss() {
    let store = Arc::new(MemoryCache::new());
    store.put("gone", "\"v\"", 0).await;

    assert!(store.get("gone").await.is_none());
}

#[test]
fn test_policy_reads_and_writes() {
    let default = CachePolicy::default();
    assert!(default.reads());
    assert!(default.writes());

    // TTL zero or below turns the read path off but the write path
    // stays on by default.
    let disabled = CachePolicy::ttl(0);
    assert!(!disabled.reads());
    assert!(disabled.writes());

    let negative = CachePolicy::ttl(-5);
    assert!(!negative.reads());
    assert!(negative.writes());

    let suppressed = CachePolicy {
        ttl_seconds: 0,
        write_when_disabled: false,
    };
    assert!(!suppressed.reads());
    assert!(!suppressed.writes());
}

#[test]
fn test_store_ttl_padding() {
    assert_eq!(CachePolicy::ttl(60).store_ttl(), 61);
    assert_eq!(CachePolicy::ttl(0).store_ttl(), 1);
    assert_eq!(CachePolicy::ttl(-10).store_ttl(), 1);
}
