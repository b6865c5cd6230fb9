#![cfg(all(feature = "tree", feature = "hash", feature = "sorted"))]
//! Property-based tests for the map contract.
//!
//! Every backend replays a random script of puts and removes alongside a
//! `BTreeMap` model and must agree with it after each step.

use std::collections::BTreeMap;

use mapsmith::map::{ChainedHashMap, Map, OrderedTreeMap, SortedArrayMap, UnorderedBucketMap};
use proptest::prelude::*;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    Put(i16, i32),
    Remove(i16),
}

/// Keys come from a narrow range so that scripts revisit keys often.
fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (-64_i16..64, any::<i32>()).prop_map(|(key, value)| Operation::Put(key, value)),
        2 => (-64_i16..64).prop_map(Operation::Remove),
    ]
}

fn script(max_length: usize) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation(), 0..max_length)
}

fn replay<M: Map<i16, i32>>(map: &mut M, operations: &[Operation]) -> Result<(), TestCaseError> {
    let mut model = BTreeMap::new();
    for operation in operations {
        match *operation {
            Operation::Put(key, value) => {
                prop_assert_eq!(map.put(key, value), model.insert(key, value));
            }
            Operation::Remove(key) => {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
            }
        }
        prop_assert_eq!(map.len(), model.len());
    }
    for (key, value) in &model {
        prop_assert_eq!(map.get(key), Some(value));
    }
    let mut entries: Vec<(i16, i32)> = map.entries().into_iter().map(|(key, value)| (*key, *value)).collect();
    entries.sort_unstable();
    let expected: Vec<(i16, i32)> = model.into_iter().collect();
    prop_assert_eq!(entries, expected);
    Ok(())
}

// =============================================================================
// Model Agreement Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_tree_map_agrees_with_model(operations in script(200)) {
        replay(&mut OrderedTreeMap::new(), &operations)?;
    }

    #[test]
    fn prop_chained_hash_map_agrees_with_model(operations in script(200)) {
        replay(&mut ChainedHashMap::new(), &operations)?;
    }

    #[test]
    fn prop_small_chained_hash_map_agrees_with_model(operations in script(200)) {
        replay(&mut ChainedHashMap::with_capacity(2), &operations)?;
    }

    #[test]
    fn prop_bucket_map_agrees_with_model(operations in script(100)) {
        replay(&mut UnorderedBucketMap::new(), &operations)?;
    }

    #[test]
    fn prop_sorted_array_map_agrees_with_model(operations in script(200)) {
        replay(&mut SortedArrayMap::new(), &operations)?;
    }
}

// =============================================================================
// Get-Put Laws
// =============================================================================

proptest! {
    /// Law: get after put returns the stored value.
    #[test]
    fn prop_get_put_law(
        entries in prop::collection::vec((any::<i16>(), any::<i32>()), 0..50),
        key: i16,
        value: i32
    ) {
        let mut map: ChainedHashMap<i16, i32> = entries.into_iter().collect();
        map.put(key, value);
        prop_assert_eq!(map.get(&key), Some(&value));
    }

    /// Law: put does not disturb other keys.
    #[test]
    fn prop_get_put_other_law(
        entries in prop::collection::vec((any::<i16>(), any::<i32>()), 0..50),
        key1: i16,
        key2: i16,
        value: i32
    ) {
        prop_assume!(key1 != key2);
        let mut map: OrderedTreeMap<i16, i32> = entries.into_iter().collect();
        let before = map.get(&key2).copied();
        map.put(key1, value);
        prop_assert_eq!(map.get(&key2).copied(), before);
    }

    /// Law: get after remove returns None.
    #[test]
    fn prop_get_remove_law(
        entries in prop::collection::vec((any::<i16>(), any::<i32>()), 0..50),
        key: i16
    ) {
        let mut map: SortedArrayMap<i16, i32> = entries.into_iter().collect();
        map.remove(&key);
        prop_assert_eq!(map.get(&key), None);
    }

    /// Law: the load factor holds after any sequence of puts.
    #[test]
    fn prop_chained_hash_map_load_factor(
        keys in prop::collection::vec(any::<u32>(), 0..300),
        capacity in 0_usize..40
    ) {
        let mut map = ChainedHashMap::with_capacity(capacity);
        for key in keys {
            map.put(key, ());
            prop_assert!(map.len() * 4 <= map.table_size() * 3);
        }
    }
}
