//! Map backends sharing one contract.
//!
//! This module provides interchangeable key-value maps:
//!
//! - [`OrderedTreeMap`]: Unbalanced binary search tree over a [`LinkedBinaryTree`](crate::tree::LinkedBinaryTree)
//! - [`ChainedHashMap`]: Separate-chaining hash table of [`UnorderedBucketMap`] buckets
//! - [`UnorderedBucketMap`]: Linear-scan list of entries
//! - [`SortedArrayMap`]: Sorted vector of entries located by binary search
//!
//! Every backend implements [`Map`]; the ordered backends also implement
//! [`SortedMap`].
//!
//! # Snapshots
//!
//! `entries`, `sub_map` and `iter` copy references into a fresh `Vec`
//! before returning, so the result never observes a structural edit in
//! progress.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(all(feature = "tree", feature = "sorted"))] {
//! use mapsmith::map::{Map, OrderedTreeMap, SortedArrayMap, SortedMap};
//!
//! fn fill(map: &mut dyn SortedMap<i32, &'static str>) {
//!     map.put(5, "five");
//!     map.put(3, "three");
//!     map.put(8, "eight");
//! }
//!
//! let mut tree: OrderedTreeMap<i32, &str> = OrderedTreeMap::new();
//! let mut array: SortedArrayMap<i32, &str> = SortedArrayMap::new();
//! fill(&mut tree);
//! fill(&mut array);
//!
//! assert_eq!(tree.entries(), array.entries());
//! assert_eq!(tree.ceiling_entry(&6), Some((&8, &"eight")));
//! # }
//! ```

use std::iter::FusedIterator;

use crate::error::RangeError;

// =============================================================================
// Shared Trait Implementations
// =============================================================================

/// Implements construction, iteration and formatting traits for a backend.
///
/// The backend must provide `new`, `put`, `iter` and `into_entries`.
#[allow(unused_macros)]
macro_rules! impl_map_conversions {
    ($map:ident, [$($bound:tt)+]) => {
        impl<K: $($bound)+, V> ::std::iter::FromIterator<(K, V)> for $map<K, V> {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                let mut map = Self::new();
                map.extend(iter);
                map
            }
        }

        impl<K: $($bound)+, V> ::std::iter::Extend<(K, V)> for $map<K, V> {
            fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
                for (key, value) in iter {
                    self.put(key, value);
                }
            }
        }

        impl<'a, K, V> IntoIterator for &'a $map<K, V> {
            type Item = (&'a K, &'a V);
            type IntoIter = $crate::map::Entries<'a, K, V>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<K, V> IntoIterator for $map<K, V> {
            type Item = (K, V);
            type IntoIter = $crate::map::IntoEntries<K, V>;

            fn into_iter(self) -> Self::IntoIter {
                $crate::map::IntoEntries::new(self.into_entries())
            }
        }

        impl<K: ::std::fmt::Debug, V: ::std::fmt::Debug> ::std::fmt::Debug for $map<K, V> {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                formatter.debug_map().entries(self.iter()).finish()
            }
        }

        impl<K: ::std::fmt::Display, V: ::std::fmt::Display> ::std::fmt::Display for $map<K, V> {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{{")?;
                let mut first = true;
                for (key, value) in self {
                    if first {
                        first = false;
                    } else {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                write!(formatter, "}}")
            }
        }
    };
}

mod entry;

#[cfg(feature = "hash")]
mod bucket_map;
#[cfg(feature = "hash")]
mod hash_map;
#[cfg(feature = "hash")]
mod hashing;
#[cfg(feature = "serde")]
mod serde_support;
#[cfg(feature = "sorted")]
mod sorted_array_map;
#[cfg(feature = "tree")]
mod tree_map;

pub use entry::Entry;

#[cfg(feature = "hash")]
pub use bucket_map::UnorderedBucketMap;
#[cfg(feature = "hash")]
pub use hash_map::ChainedHashMap;
#[cfg(feature = "sorted")]
pub use sorted_array_map::SortedArrayMap;
#[cfg(feature = "tree")]
pub use tree_map::OrderedTreeMap;
#[cfg(feature = "tree")]
pub use tree_map::TreeSlot;

// =============================================================================
// Map Contract
// =============================================================================

/// The operations every map backend supports.
///
/// Absence is reported as `None`. Values are stored as-is, so a map of
/// `Option<T>` values can tell a stored `None` (`Some(&None)`) apart from a
/// missing key (`None`).
pub trait Map<K, V> {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored for `key`.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns a mutable reference to the value stored for `key`.
    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// `None` means the key was newly inserted.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Removes `key`, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a snapshot of every entry.
    ///
    /// Ordered backends yield ascending keys; hash-based backends make no
    /// ordering promise.
    fn entries(&self) -> Vec<(&K, &V)>;
}

/// Navigation queries offered by the key-ordered backends.
pub trait SortedMap<K, V>: Map<K, V> {
    /// Returns the entry with the smallest key.
    fn first_entry(&self) -> Option<(&K, &V)>;

    /// Returns the entry with the largest key.
    fn last_entry(&self) -> Option<(&K, &V)>;

    /// Returns the entry with the smallest key `>= key`.
    fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)>;

    /// Returns the entry with the largest key `<= key`.
    fn floor_entry(&self, key: &K) -> Option<(&K, &V)>;

    /// Returns the entry with the largest key `< key`.
    fn lower_entry(&self, key: &K) -> Option<(&K, &V)>;

    /// Returns the entry with the smallest key `> key`.
    fn higher_entry(&self, key: &K) -> Option<(&K, &V)>;

    /// Returns the entries with keys in `[from_key, to_key)` in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidRange`] unless `from_key < to_key`.
    fn sub_map(&self, from_key: &K, to_key: &K) -> Result<Vec<(&K, &V)>, RangeError>;
}

// =============================================================================
// Iterators
// =============================================================================

/// A borrowing iterator over a snapshot of a map's entries.
pub struct Entries<'a, K, V> {
    snapshot: std::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) fn new(snapshot: Vec<(&'a K, &'a V)>) -> Self {
        Self {
            snapshot: snapshot.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.snapshot.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.snapshot.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Entries<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.snapshot.next_back()
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

/// An owning iterator over a map's entries.
pub struct IntoEntries<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> IntoEntries<K, V> {
    pub(crate) fn new(entries: Vec<(K, V)>) -> Self {
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoEntries<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoEntries<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoEntries<K, V> {}

impl<K, V> FusedIterator for IntoEntries<K, V> {}
