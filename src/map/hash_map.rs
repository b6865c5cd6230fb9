//! Separate-chaining hash map.
//!
//! This module provides [`ChainedHashMap`], a hash table whose slots hold
//! lazily created [`UnorderedBucketMap`] buckets.
//!
//! # Overview
//!
//! A key's slot is its hash reduced modulo the table length. Colliding keys
//! share a bucket and are told apart by equality. When an insertion pushes
//! the entry count above `capacity * 0.75`, the whole table is rebuilt with
//! `2 * capacity - 1` slots and every entry is reinserted.
//!
//! - O(1) expected get, put, remove (O(n) when every key collides)
//! - O(n + capacity) entries snapshot
//! - O(1) len and `is_empty`
//!
//! # Examples
//!
//! ```rust
//! use mapsmith::map::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! assert_eq!(map.table_size(), 17);
//!
//! for key in 0..13 {
//!     map.put(key, key.to_string());
//! }
//! // 13 > 17 * 0.75 forces a rehash
//! assert_eq!(map.table_size(), 33);
//! assert_eq!(map.get(&7), Some(&"7".to_string()));
//! ```

use std::borrow::Borrow;
use std::hash::Hash;
use std::mem;

use super::hashing::{compute_hash, slot_index};
use super::{Entries, Entry, Map, UnorderedBucketMap};

/// Smallest table length. A single slot could never fall back under the
/// load factor, since `2 * 1 - 1 == 1`.
const MIN_CAPACITY: usize = 2;

/// The load factor expressed as the exact ratio `3 / 4`.
const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;

static_assertions::const_assert!(ChainedHashMap::<(), ()>::DEFAULT_CAPACITY >= MIN_CAPACITY);
static_assertions::const_assert!(LOAD_FACTOR_NUMERATOR < LOAD_FACTOR_DENOMINATOR);

type Table<K, V> = Vec<Option<UnorderedBucketMap<K, V>>>;

fn empty_table<K, V>(capacity: usize) -> Table<K, V> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

// =============================================================================
// ChainedHashMap Definition
// =============================================================================

/// A hash map resolving collisions with per-slot [`UnorderedBucketMap`]s.
///
/// # Time Complexity
///
/// | Operation            | Expected | Worst |
/// |----------------------|----------|-------|
/// | `get`/`put`/`remove` | O(1)     | O(n)  |
/// | rehash (inside `put`) | O(n + capacity) | |
/// | `entries`            | O(n + capacity) |  |
/// | `len`/`is_empty`/`table_size` | O(1) | |
///
/// Entry order follows table slots and is not stable across rehashes.
#[derive(Clone)]
pub struct ChainedHashMap<K, V> {
    table: Table<K, V>,
    length: usize,
}

impl<K, V> ChainedHashMap<K, V> {
    /// Table length used by [`ChainedHashMap::new`].
    pub const DEFAULT_CAPACITY: usize = 17;

    /// Entry count to table length ratio above which the table is rebuilt.
    pub const LOAD_FACTOR: f64 = 0.75;

    /// Creates an empty map with [`Self::DEFAULT_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty map with `capacity` slots (at least two).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::map::ChainedHashMap;
    ///
    /// let map: ChainedHashMap<u8, u8> = ChainedHashMap::with_capacity(5);
    /// assert_eq!(map.table_size(), 5);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: empty_table(capacity.max(MIN_CAPACITY)),
            length: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of slots in the table.
    #[inline]
    #[must_use]
    pub const fn table_size(&self) -> usize {
        self.table.len()
    }

    /// Returns an iterator over a snapshot of the entries, slot by slot.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.entries())
    }

    /// Returns a snapshot of every entry, slot by slot.
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        let mut snapshot = Vec::with_capacity(self.length);
        snapshot.extend(
            self.table
                .iter()
                .flatten()
                .flat_map(UnorderedBucketMap::as_slice)
                .map(Entry::as_pair),
        );
        snapshot
    }

    /// Returns the keys, slot by slot.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the values, slot by slot.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Consumes the map, returning its entries slot by slot.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.table
            .into_iter()
            .flatten()
            .flat_map(UnorderedBucketMap::into_entries)
            .collect()
    }

    const fn exceeds_load_factor(&self) -> bool {
        self.length * LOAD_FACTOR_DENOMINATOR > self.table.len() * LOAD_FACTOR_NUMERATOR
    }
}

impl<K: Hash + Eq, V> ChainedHashMap<K, V> {
    fn slot_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        slot_index(compute_hash(key), self.table.len())
    }

    /// Returns the value stored for `key`.
    ///
    /// The key may be any borrowed form of the map's key type, as long as
    /// hashing and equality agree with the owned form.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table[self.slot_of(key)].as_ref()?.get(key)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        self.table[slot].as_mut()?.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// Rehashes into `2 * capacity - 1` slots when the insertion leaves more
    /// than `capacity * 0.75` entries.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let slot = self.slot_of(&key);
        let bucket = self.table[slot].get_or_insert_with(UnorderedBucketMap::new);
        let before = bucket.len();
        let previous = bucket.put(key, value);
        self.length += bucket.len() - before;

        if self.exceeds_load_factor() {
            self.resize(2 * self.table.len() - 1);
        }
        previous
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot_of(key);
        let bucket = self.table[slot].as_mut()?;
        let before = bucket.len();
        let removed = bucket.remove(key);
        self.length -= before - bucket.len();
        removed
    }

    /// Rebuilds the table with `capacity` slots, reinserting every entry.
    fn resize(&mut self, capacity: usize) {
        tracing::debug!(
            old_capacity = self.table.len(),
            new_capacity = capacity,
            size = self.length,
            "rehashing chained hash map"
        );
        let old_table = mem::replace(&mut self.table, empty_table(capacity));
        for (key, value) in old_table
            .into_iter()
            .flatten()
            .flat_map(UnorderedBucketMap::into_entries)
        {
            let slot = self.slot_of(&key);
            self.table[slot]
                .get_or_insert_with(UnorderedBucketMap::new)
                .put(key, value);
        }
    }
}

impl<K: Hash + Eq, V> Map<K, V> for ChainedHashMap<K, V> {
    fn len(&self) -> usize {
        self.length
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        Self::get_mut(self, key)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        Self::put(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        Self::remove(self, key)
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        Self::entries(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for ChainedHashMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both maps hold the same keys with equal values, regardless of
/// table size.
impl<K: Hash + Eq, V: PartialEq> PartialEq for ChainedHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for ChainedHashMap<K, V> {}

impl_map_conversions!(ChainedHashMap, [Hash + Eq]);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_uses_default_capacity() {
        let map: ChainedHashMap<i32, i32> = ChainedHashMap::new();
        assert_eq!(map.table_size(), 17);
        assert!(map.is_empty());
    }

    #[rstest]
    #[case(0, 2)]
    #[case(1, 2)]
    #[case(2, 2)]
    #[case(11, 11)]
    fn test_with_capacity_clamps_to_minimum(#[case] requested: usize, #[case] expected: usize) {
        let map: ChainedHashMap<i32, i32> = ChainedHashMap::with_capacity(requested);
        assert_eq!(map.table_size(), expected);
    }

    #[rstest]
    fn test_rehash_happens_exactly_past_threshold() {
        let mut map = ChainedHashMap::new();
        for key in 0..12 {
            map.put(key, ());
        }
        // 12 <= 12.75
        assert_eq!(map.table_size(), 17);
        map.put(12, ());
        assert_eq!(map.table_size(), 33);
    }

    #[rstest]
    fn test_overwrite_does_not_grow() {
        let mut map = ChainedHashMap::with_capacity(4);
        map.put("a", 1);
        map.put("b", 2);
        map.put("c", 3);
        assert_eq!(map.table_size(), 4);
        assert_eq!(map.put("c", 30), Some(3));
        assert_eq!(map.len(), 3);
        assert_eq!(map.table_size(), 4);
    }

    #[rstest]
    fn test_small_table_grows_by_formula() {
        let mut map = ChainedHashMap::with_capacity(2);
        map.put(1, 1);
        assert_eq!(map.table_size(), 2);
        map.put(2, 2);
        assert_eq!(map.table_size(), 3);
        map.put(3, 3);
        assert_eq!(map.table_size(), 5);
    }

    #[rstest]
    fn test_remove_missing_from_empty_slot() {
        let mut map: ChainedHashMap<i32, i32> = ChainedHashMap::new();
        assert_eq!(map.remove(&99), None);
        assert_eq!(map.len(), 0);
    }

    #[rstest]
    fn test_equality_across_table_sizes() {
        let mut small: ChainedHashMap<i32, i32> = ChainedHashMap::with_capacity(2);
        let mut large: ChainedHashMap<i32, i32> = ChainedHashMap::with_capacity(101);
        for key in 0..10 {
            small.put(key, key);
            large.put(9 - key, 9 - key);
        }
        assert_ne!(small.table_size(), large.table_size());
        assert_eq!(small, large);
    }
}
