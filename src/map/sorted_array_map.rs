//! Sorted-vector map located by binary search.
//!
//! [`SortedArrayMap`] keeps its entries in a `Vec` ordered by strictly
//! increasing key. Lookups and navigation queries are binary searches;
//! insertions and removals shift the tail.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::{Entries, Entry, Map, SortedMap};
use crate::error::RangeError;

// =============================================================================
// SortedArrayMap Definition
// =============================================================================

/// An ordered map backed by a sorted vector of entries.
///
/// # Time Complexity
///
/// | Operation                        | Complexity |
/// |----------------------------------|------------|
/// | `get`/`contains_key`             | O(log n)   |
/// | `put`/`remove`                   | O(n)       |
/// | `first_entry`/`last_entry`       | O(1)       |
/// | `ceiling`/`floor`/`lower`/`higher` | O(log n) |
/// | `sub_map`                        | O(log n + m) |
///
/// # Examples
///
/// ```rust
/// use mapsmith::map::SortedArrayMap;
///
/// let map: SortedArrayMap<i32, char> = [(10, 'a'), (30, 'c'), (20, 'b')].into_iter().collect();
///
/// assert_eq!(map.first_entry(), Some((&10, &'a')));
/// assert_eq!(map.floor_entry(&25), Some((&20, &'b')));
/// assert_eq!(map.higher_entry(&30), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SortedArrayMap<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> SortedArrayMap<K, V> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over a snapshot of the entries in ascending key order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.entries())
    }

    /// Returns a snapshot of every entry in ascending key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.entries.iter().map(Entry::as_pair).collect()
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(Entry::key)
    }

    /// Returns the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(Entry::value)
    }

    /// Consumes the map, returning its entries in ascending key order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries.into_iter().map(Entry::into_parts).collect()
    }

    /// Returns the entry with the smallest key.
    #[inline]
    #[must_use]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.entries.first().map(Entry::as_pair)
    }

    /// Returns the entry with the largest key.
    #[inline]
    #[must_use]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.entries.last().map(Entry::as_pair)
    }

    fn pair_at(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(Entry::as_pair)
    }
}

impl<K: Ord, V> SortedArrayMap<K, V> {
    /// Locates `key` by binary search.
    ///
    /// Returns `Ok(index)` of the matching entry, or `Err(index)` of the
    /// first entry whose key is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::map::SortedArrayMap;
    ///
    /// let map: SortedArrayMap<i32, ()> = [(1, ()), (3, ()), (5, ())].into_iter().collect();
    /// assert_eq!(map.search(&3), Ok(1));
    /// assert_eq!(map.search(&4), Err(2));
    /// assert_eq!(map.search(&9), Err(3));
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries
            .binary_search_by(|entry| Borrow::<Q>::borrow(entry.key()).cmp(key))
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.search(key).ok()?;
        Some(self.entries[index].value())
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.search(key).ok()?;
        Some(self.entries[index].value_mut())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_ok()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(index) => Some(self.entries[index].set_value(value)),
            Err(index) => {
                self.entries.insert(index, Entry::new(key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.search(key).ok()?;
        Some(self.entries.remove(index).into_value())
    }

    // =========================================================================
    // Navigation Queries
    // =========================================================================

    /// Returns the entry with the smallest key greater than or equal to `key`.
    #[must_use]
    pub fn ceiling_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (Ok(index) | Err(index)) = self.search(key);
        self.pair_at(index)
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    #[must_use]
    pub fn floor_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = match self.search(key) {
            Ok(index) => index,
            Err(insertion) => insertion.checked_sub(1)?,
        };
        self.pair_at(index)
    }

    /// Returns the entry with the largest key strictly less than `key`.
    #[must_use]
    pub fn lower_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (Ok(index) | Err(index)) = self.search(key);
        self.pair_at(index.checked_sub(1)?)
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    #[must_use]
    pub fn higher_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = match self.search(key) {
            Ok(index) => index + 1,
            Err(insertion) => insertion,
        };
        self.pair_at(index)
    }

    /// Returns the entries with keys in `[from_key, to_key)`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidRange`] unless `from_key < to_key`.
    pub fn sub_map<Q>(&self, from_key: &Q, to_key: &Q) -> Result<Vec<(&K, &V)>, RangeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if from_key >= to_key {
            return Err(RangeError::InvalidRange);
        }
        let (Ok(start) | Err(start)) = self.search(from_key);
        Ok(self.entries[start..]
            .iter()
            .take_while(|entry| {
                Borrow::<Q>::borrow(entry.key()).cmp(to_key) == Ordering::Less
            })
            .map(Entry::as_pair)
            .collect())
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Ord, V> Map<K, V> for SortedArrayMap<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
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

impl<K: Ord, V> SortedMap<K, V> for SortedArrayMap<K, V> {
    fn first_entry(&self) -> Option<(&K, &V)> {
        Self::first_entry(self)
    }

    fn last_entry(&self) -> Option<(&K, &V)> {
        Self::last_entry(self)
    }

    fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        Self::ceiling_entry(self, key)
    }

    fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        Self::floor_entry(self, key)
    }

    fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        Self::lower_entry(self, key)
    }

    fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        Self::higher_entry(self, key)
    }

    fn sub_map(&self, from_key: &K, to_key: &K) -> Result<Vec<(&K, &V)>, RangeError> {
        Self::sub_map(self, from_key, to_key)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for SortedArrayMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl_map_conversions!(SortedArrayMap, [Ord]);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_map() -> SortedArrayMap<i32, &'static str> {
        [(9, "nine"), (1, "one"), (5, "five")].into_iter().collect()
    }

    #[rstest]
    fn test_put_keeps_keys_sorted() {
        let map = sample_map();
        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![1, 5, 9]);
    }

    #[rstest]
    #[case(0, None, Some(1), None, Some(1))]
    #[case(1, Some(1), Some(1), None, Some(5))]
    #[case(3, Some(1), Some(5), Some(1), Some(5))]
    #[case(9, Some(9), Some(9), Some(5), None)]
    #[case(10, Some(9), None, Some(9), None)]
    fn test_navigation(
        #[case] key: i32,
        #[case] floor: Option<i32>,
        #[case] ceiling: Option<i32>,
        #[case] lower: Option<i32>,
        #[case] higher: Option<i32>,
    ) {
        let map = sample_map();
        assert_eq!(map.floor_entry(&key).map(|(key, _)| *key), floor);
        assert_eq!(map.ceiling_entry(&key).map(|(key, _)| *key), ceiling);
        assert_eq!(map.lower_entry(&key).map(|(key, _)| *key), lower);
        assert_eq!(map.higher_entry(&key).map(|(key, _)| *key), higher);
    }

    #[rstest]
    fn test_first_and_last_on_empty_map() {
        let map: SortedArrayMap<i32, i32> = SortedArrayMap::new();
        assert_eq!(map.first_entry(), None);
        assert_eq!(map.last_entry(), None);
    }

    #[rstest]
    fn test_remove_shifts_tail() {
        let mut map = sample_map();
        assert_eq!(map.remove(&1), Some("one"));
        assert_eq!(map.search(&5), Ok(0));
        assert_eq!(map.first_entry(), Some((&5, &"five")));
    }

    #[rstest]
    #[case(1, 9, vec![1, 5])]
    #[case(2, 9, vec![5])]
    #[case(2, 10, vec![5, 9])]
    #[case(10, 20, vec![])]
    fn test_sub_map_half_open(#[case] from: i32, #[case] to: i32, #[case] expected: Vec<i32>) {
        let map = sample_map();
        let keys: Vec<i32> = map
            .sub_map(&from, &to)
            .unwrap()
            .into_iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, expected);
    }

    #[rstest]
    #[case(5, 5)]
    #[case(9, 1)]
    fn test_sub_map_rejects_empty_range(#[case] from: i32, #[case] to: i32) {
        assert_eq!(sample_map().sub_map(&from, &to), Err(RangeError::InvalidRange));
    }

    #[rstest]
    fn test_borrowed_string_lookup() {
        let mut map: SortedArrayMap<String, usize> = SortedArrayMap::new();
        map.put("beta".to_string(), 2);
        map.put("alpha".to_string(), 1);
        assert_eq!(map.get("alpha"), Some(&1));
        assert_eq!(map.ceiling_entry("b").map(|(key, _)| key.as_str()), Some("beta"));
    }
}
