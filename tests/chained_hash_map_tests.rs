#![cfg(feature = "hash")]
//! Integration tests for ChainedHashMap.

use std::hash::{Hash, Hasher};

use mapsmith::map::ChainedHashMap;
use rstest::rstest;

/// A key whose hash ignores everything but a bucket hint, so tests can force
/// collisions.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Colliding {
    hint: u8,
    id: u32,
}

impl Hash for Colliding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hint.hash(state);
    }
}

const fn colliding(id: u32) -> Colliding {
    Colliding { hint: 0, id }
}

// =============================================================================
// Basic Operations
// =============================================================================

#[rstest]
fn test_put_get_remove_scenario() {
    let mut map = ChainedHashMap::new();
    assert_eq!(map.put("a", 1), None);
    assert_eq!(map.put("b", 2), None);
    assert_eq!(map.remove("a"), Some(1));

    assert_eq!(map.get("a"), None);
    assert_eq!(map.get("b"), Some(&2));
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_put_existing_key_returns_previous() {
    let mut map = ChainedHashMap::new();
    map.put(1, "one");
    assert_eq!(map.put(1, "uno"), Some("one"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"uno"));
}

#[rstest]
fn test_remove_twice() {
    let mut map: ChainedHashMap<i32, i32> = (0..5).map(|key| (key, key)).collect();
    assert_eq!(map.remove(&3), Some(3));
    assert_eq!(map.remove(&3), None);
    assert_eq!(map.len(), 4);
}

#[rstest]
fn test_get_mut_and_contains_key() {
    let mut map: ChainedHashMap<String, Vec<i32>> = ChainedHashMap::new();
    map.put("list".to_string(), vec![1]);
    map.get_mut("list").unwrap().push(2);
    assert_eq!(map.get("list"), Some(&vec![1, 2]));
    assert!(map.contains_key("list"));
    assert!(!map.contains_key("other"));
}

// =============================================================================
// Collisions
// =============================================================================

#[rstest]
fn test_colliding_keys_share_a_bucket() {
    let mut map = ChainedHashMap::with_capacity(101);
    for id in 0..10 {
        map.put(colliding(id), id);
    }
    assert_eq!(map.len(), 10);
    for id in 0..10 {
        assert_eq!(map.get(&colliding(id)), Some(&id));
    }
    assert_eq!(map.remove(&colliding(4)), Some(4));
    assert_eq!(map.get(&colliding(4)), None);
    assert_eq!(map.get(&colliding(9)), Some(&9));
    assert_eq!(map.len(), 9);
}

#[rstest]
fn test_colliding_keys_survive_rehash() {
    let mut map = ChainedHashMap::with_capacity(3);
    for id in 0..20 {
        map.put(colliding(id), id * 2);
    }
    assert!(map.table_size() > 3);
    for id in 0..20 {
        assert_eq!(map.get(&colliding(id)), Some(&(id * 2)));
    }
}

// =============================================================================
// Resizing
// =============================================================================

#[rstest]
fn test_rehash_preserves_contents() {
    let mut map = ChainedHashMap::new();
    for key in 0..1_000 {
        map.put(key, key * key);
    }
    assert_eq!(map.len(), 1_000);
    for key in 0..1_000 {
        assert_eq!(map.get(&key), Some(&(key * key)));
    }
}

#[rstest]
fn test_table_grows_to_twice_minus_one() {
    let mut map = ChainedHashMap::new();
    let mut sizes = vec![map.table_size()];
    for key in 0..90 {
        map.put(key, ());
        if map.table_size() != *sizes.last().unwrap() {
            sizes.push(map.table_size());
        }
    }
    assert_eq!(sizes, vec![17, 33, 65, 129]);
}

#[rstest]
fn test_load_stays_within_factor_after_every_put() {
    let mut map = ChainedHashMap::with_capacity(2);
    for key in 0..500 {
        map.put(key, ());
        assert!(map.len() * 4 <= map.table_size() * 3);
    }
}

#[rstest]
fn test_removal_never_shrinks() {
    let mut map: ChainedHashMap<i32, i32> = (0..50).map(|key| (key, key)).collect();
    let size = map.table_size();
    for key in 0..50 {
        map.remove(&key);
    }
    assert!(map.is_empty());
    assert_eq!(map.table_size(), size);
}

// =============================================================================
// Conversions
// =============================================================================

#[rstest]
fn test_entries_cover_every_key_once() {
    let map: ChainedHashMap<i32, i32> = (0..40).map(|key| (key, -key)).collect();
    let mut keys: Vec<i32> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..40).collect::<Vec<_>>());
    assert_eq!(map.entries().len(), 40);
    assert_eq!(map.values().sum::<i32>(), -(0..40).sum::<i32>());
}

#[rstest]
fn test_into_iter_moves_entries_out() {
    let map: ChainedHashMap<String, i32> =
        [("x".to_string(), 1), ("y".to_string(), 2)].into_iter().collect();
    let mut owned: Vec<(String, i32)> = map.into_iter().collect();
    owned.sort();
    assert_eq!(owned, vec![("x".to_string(), 1), ("y".to_string(), 2)]);
}

#[rstest]
fn test_display_of_single_entry() {
    let mut map = ChainedHashMap::new();
    map.put("k", 9);
    assert_eq!(map.to_string(), "{k: 9}");
    assert_eq!(format!("{map:?}"), r#"{"k": 9}"#);
}
