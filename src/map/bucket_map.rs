//! Linear-scan map over a flat list of entries.
//!
//! [`UnorderedBucketMap`] compares keys for equality only, so it needs
//! neither ordering nor hashing. It backs each bucket of
//! [`ChainedHashMap`](super::ChainedHashMap) and also works as a small
//! standalone map.

use std::borrow::Borrow;

use super::{Entries, Entry, Map};

/// An unordered map that locates keys by linear scan.
///
/// # Time Complexity
///
/// | Operation            | Complexity |
/// |----------------------|------------|
/// | `get`/`put`/`remove` | O(n)       |
/// | `len`/`is_empty`     | O(1)       |
///
/// `remove` moves the last entry into the vacated slot, so it never shifts
/// the tail; entry order is therefore not insertion order after a removal.
///
/// # Examples
///
/// ```rust
/// use mapsmith::map::UnorderedBucketMap;
///
/// let mut map = UnorderedBucketMap::new();
/// map.put("a", 1);
/// map.put("b", 2);
/// assert_eq!(map.remove("a"), Some(1));
///
/// assert_eq!(map.get("a"), None);
/// assert_eq!(map.get("b"), Some(&2));
/// assert_eq!(map.len(), 1);
/// ```
#[derive(Clone)]
pub struct UnorderedBucketMap<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> UnorderedBucketMap<K, V> {
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

    /// Returns an iterator over a snapshot of the entries in storage order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.entries())
    }

    /// Returns a snapshot of every entry in storage order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.entries.iter().map(Entry::as_pair).collect()
    }

    pub(super) fn as_slice(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Consumes the map, returning its entries in storage order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries.into_iter().map(Entry::into_parts).collect()
    }
}

impl<K: Eq, V> UnorderedBucketMap<K, V> {
    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .position(|entry| key == entry.key().borrow())
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index(key).map(|index| self.entries[index].value())
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index(key)
            .map(|index| self.entries[index].value_mut())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// New keys are appended.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.find_index(&key) {
            Some(index) => Some(self.entries[index].set_value(value)),
            None => {
                self.entries.push(Entry::new(key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value.
    ///
    /// The last entry takes the removed entry's slot.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index(key)
            .map(|index| self.entries.swap_remove(index).into_value())
    }
}

impl<K: Eq, V> Map<K, V> for UnorderedBucketMap<K, V> {
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

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for UnorderedBucketMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both maps hold the same keys with equal values, in any order.
impl<K: Eq, V: PartialEq> PartialEq for UnorderedBucketMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|entry| other.get(entry.key()) == Some(entry.value()))
    }
}

impl<K: Eq, V: Eq> Eq for UnorderedBucketMap<K, V> {}

impl_map_conversions!(UnorderedBucketMap, [Eq]);
