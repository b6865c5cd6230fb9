#![cfg(all(feature = "serde", feature = "tree", feature = "hash", feature = "sorted"))]

//! Integration tests for serde support.
//!
//! Every backend serializes as a JSON object and reads one back.

use mapsmith::map::{ChainedHashMap, OrderedTreeMap, SortedArrayMap, UnorderedBucketMap};
use rstest::rstest;

// =============================================================================
// Ordered Backends
// =============================================================================

#[rstest]
fn test_tree_map_serializes_in_key_order() {
    let map: OrderedTreeMap<String, i32> = [("c", 3), ("a", 1), ("b", 2)]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2,"c":3}"#);
}

#[rstest]
fn test_tree_map_roundtrip() {
    let original: OrderedTreeMap<String, Vec<i32>> = [
        ("numbers".to_string(), vec![1, 2, 3]),
        ("empty".to_string(), vec![]),
    ]
    .into_iter()
    .collect();
    let json = serde_json::to_string(&original).unwrap();
    let restored: OrderedTreeMap<String, Vec<i32>> = serde_json::from_str(&json).unwrap();
    assert_eq!(original, restored);
}

#[rstest]
fn test_sorted_array_map_roundtrip() {
    let original: SortedArrayMap<String, f64> = [("pi".to_string(), 3.5), ("e".to_string(), 2.5)]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&original).unwrap();
    assert_eq!(json, r#"{"e":2.5,"pi":3.5}"#);
    let restored: SortedArrayMap<String, f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(original, restored);
}

#[rstest]
fn test_empty_object() {
    let map: OrderedTreeMap<String, i32> = serde_json::from_str("{}").unwrap();
    assert!(map.is_empty());
    assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
}

// =============================================================================
// Hash Backends
// =============================================================================

#[rstest]
fn test_chained_hash_map_roundtrip_across_rehash() {
    let original: ChainedHashMap<String, i32> = (0..100)
        .map(|index| (format!("key{index}"), index))
        .collect();
    let json = serde_json::to_string(&original).unwrap();
    let restored: ChainedHashMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 100);
    for index in 0..100 {
        assert_eq!(restored.get(&format!("key{index}")), Some(&index));
    }
    assert_eq!(original, restored);
}

#[rstest]
fn test_bucket_map_roundtrip() {
    let original: UnorderedBucketMap<String, bool> =
        [("on".to_string(), true), ("off".to_string(), false)].into_iter().collect();
    let json = serde_json::to_string(&original).unwrap();
    assert_eq!(json, r#"{"on":true,"off":false}"#);
    let restored: UnorderedBucketMap<String, bool> = serde_json::from_str(&json).unwrap();
    assert_eq!(original, restored);
}

#[rstest]
fn test_type_mismatch_is_an_error() {
    let result: Result<ChainedHashMap<String, i32>, _> = serde_json::from_str(r#"{"a":"text"}"#);
    assert!(result.is_err());
}
