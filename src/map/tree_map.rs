//! Sorted map over an unbalanced binary search tree.
//!
//! This module provides [`OrderedTreeMap`], a key-ordered map stored in a
//! [`LinkedBinaryTree`]. Internal nodes carry exactly one entry and every
//! leaf is an empty external sentinel, so a map of `n` entries always has
//! `n` internal nodes and `n + 1` external nodes.
//!
//! # Overview
//!
//! The tree is never rebalanced: its shape mirrors insertion order. Random
//! insertion order gives an expected height of O(log n); sorted insertion
//! order degenerates into a chain of height n. Every search and update costs
//! O(height).
//!
//! - O(height) get, put, remove
//! - O(height) first/last and ceiling/floor/lower/higher navigation
//! - O(n) entries snapshot, O(height + k) sub-map with pruning
//! - O(1) len and `is_empty`
//!
//! All traversals use explicit stacks or loops, so degenerate trees cost
//! heap space rather than call-stack depth.
//!
//! # Examples
//!
//! ```rust
//! use mapsmith::map::OrderedTreeMap;
//!
//! let mut map = OrderedTreeMap::new();
//! for key in [5, 3, 8, 1, 4] {
//!     map.put(key, key * 10);
//! }
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &8]);
//!
//! map.remove(&3);
//! assert_eq!(map.floor_entry(&4), Some((&4, &40)));
//! assert_eq!(map.ceiling_entry(&6), Some((&8, &80)));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::{Entries, Entry, Map, SortedMap};
use crate::error::{RangeError, TreeError};
use crate::tree::{LinkedBinaryTree, Position};

const TREE_INVARIANT_PANIC_MESSAGE: &str =
    "OrderedTreeMap invariant violated: internal nodes carry entries and have two children";

// =============================================================================
// Node Payload
// =============================================================================

/// The payload of one node in an [`OrderedTreeMap`]'s tree.
///
/// `Internal` nodes carry an entry; `External` nodes are empty sentinels
/// marking where a new key would be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeSlot<K, V> {
    /// A leaf with no entry.
    External,
    /// A node holding one entry.
    Internal(Entry<K, V>),
}

impl<K, V> TreeSlot<K, V> {
    /// Returns the entry of an internal node.
    #[inline]
    pub const fn entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Self::External => None,
            Self::Internal(entry) => Some(entry),
        }
    }

    /// Returns `true` for an internal node.
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    fn into_entry(self) -> Entry<K, V> {
        match self {
            Self::Internal(entry) => entry,
            Self::External => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }
}

/// Unwraps a tree operation on a position this map obtained from its own tree.
fn checked<T>(result: Result<T, TreeError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}: {error}"),
    }
}

/// Direction of the step just taken while walking toward the root.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Ascent {
    FromLeft,
    FromRight,
}

// =============================================================================
// OrderedTreeMap Definition
// =============================================================================

/// A sorted map backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. The map keeps entries in key order, answers
/// nearest-neighbour queries, and extracts half-open key ranges.
///
/// # Time Complexity
///
/// | Operation            | Complexity                   |
/// |----------------------|------------------------------|
/// | `new`                | O(1)                         |
/// | `get`/`put`/`remove` | O(h), h = height (n worst)   |
/// | `first_entry`/`last_entry` | O(h)                   |
/// | navigation queries   | O(h)                         |
/// | `entries`            | O(n)                         |
/// | `sub_map`            | O(h + k)                     |
/// | `len`/`is_empty`     | O(1)                         |
///
/// # Examples
///
/// ```rust
/// use mapsmith::map::OrderedTreeMap;
///
/// let mut map = OrderedTreeMap::new();
/// assert_eq!(map.put("b", 2), None);
/// assert_eq!(map.put("a", 1), None);
/// assert_eq!(map.put("b", 20), Some(2));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.first_entry(), Some((&"a", &1)));
/// ```
#[derive(Clone)]
pub struct OrderedTreeMap<K, V> {
    tree: LinkedBinaryTree<TreeSlot<K, V>>,
    length: usize,
}

impl<K, V> OrderedTreeMap<K, V> {
    /// Creates an empty map: a tree holding one external root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: LinkedBinaryTree::with_root(TreeSlot::External),
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

    /// Returns the backing tree.
    ///
    /// Useful for inspecting the shape the insertion order produced.
    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &LinkedBinaryTree<TreeSlot<K, V>> {
        &self.tree
    }

    /// Returns the height of the backing tree, counting external sentinels.
    ///
    /// An empty map has height 0; a single entry gives height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        checked(self.tree.height(self.root()))
    }

    /// Returns an iterator over a snapshot of the entries in ascending key order.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries::new(self.entries())
    }

    /// Returns a snapshot of every entry in ascending key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        let mut snapshot = Vec::with_capacity(self.length);
        snapshot.extend(
            self.tree
                .iter()
                .filter_map(TreeSlot::entry)
                .map(Entry::as_pair),
        );
        snapshot
    }

    /// Returns the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns the values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Consumes the map, returning its entries in ascending key order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.tree
            .into_elements()
            .into_iter()
            .filter_map(|slot| match slot {
                TreeSlot::Internal(entry) => Some(entry.into_parts()),
                TreeSlot::External => None,
            })
            .collect()
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.tree_min(self.root()).map(|position| self.pair(position))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.tree_max(self.root()).map(|position| self.pair(position))
    }

    // =========================================================================
    // Tree Navigation
    // =========================================================================

    fn root(&self) -> Position {
        match self.tree.root() {
            Some(root) => root,
            None => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    fn parent(&self, position: Position) -> Option<Position> {
        checked(self.tree.parent(position))
    }

    /// Left child of an internal node.
    fn left(&self, position: Position) -> Position {
        match checked(self.tree.left(position)) {
            Some(left) => left,
            None => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    /// Right child of an internal node.
    fn right(&self, position: Position) -> Position {
        match checked(self.tree.right(position)) {
            Some(right) => right,
            None => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    fn is_external(&self, position: Position) -> bool {
        checked(self.tree.is_external(position))
    }

    fn entry(&self, position: Position) -> Option<&Entry<K, V>> {
        checked(self.tree.element(position)).entry()
    }

    /// Entry of an internal node as a borrowed pair.
    fn pair(&self, position: Position) -> (&K, &V) {
        match self.entry(position) {
            Some(entry) => entry.as_pair(),
            None => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    /// The internal node holding the smallest key under `position`.
    fn tree_min(&self, position: Position) -> Option<Position> {
        if self.is_external(position) {
            return None;
        }
        let mut walk = position;
        while !self.is_external(walk) {
            walk = self.left(walk);
        }
        self.parent(walk)
    }

    /// The internal node holding the largest key under `position`.
    fn tree_max(&self, position: Position) -> Option<Position> {
        if self.is_external(position) {
            return None;
        }
        let mut walk = position;
        while !self.is_external(walk) {
            walk = self.right(walk);
        }
        self.parent(walk)
    }

    /// The in-order successor of an internal node with an internal right child.
    fn successor(&self, position: Position) -> Position {
        match self.tree_min(self.right(position)) {
            Some(successor) => successor,
            None => unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    /// Walks from `position` toward the root and returns the first ancestor
    /// entered from the given side.
    fn ascend(&self, mut position: Position, ascent: Ascent) -> Option<Position> {
        while let Some(parent) = self.parent(position) {
            let came_from_left = self.left(parent) == position;
            match ascent {
                Ascent::FromLeft if came_from_left => return Some(parent),
                Ascent::FromRight if !came_from_left => return Some(parent),
                _ => position = parent,
            }
        }
        None
    }
}

impl<K: Ord, V> OrderedTreeMap<K, V> {
    /// Descends from `position` toward `key`.
    ///
    /// Returns the internal node holding `key`, or the external node where
    /// `key` would be inserted.
    fn tree_search<Q>(&self, mut position: Position, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        while let Some(entry) = self.entry(position) {
            match key.cmp(entry.key().borrow()) {
                Ordering::Less => position = self.left(position),
                Ordering::Greater => position = self.right(position),
                Ordering::Equal => break,
            }
        }
        position
    }

    /// Returns the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::map::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<String, i32> = [("hello".to_string(), 42)].into_iter().collect();
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        self.entry(position).map(Entry::value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        match checked(self.tree.element_mut(position)) {
            TreeSlot::Internal(entry) => Some(entry.value_mut()),
            TreeSlot::External => None,
        }
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// A new key turns the external sentinel reached by the search into an
    /// internal node with two fresh sentinels below it. An existing key
    /// keeps its node and has its value overwritten.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let position = self.tree_search(self.root(), &key);
        if let TreeSlot::Internal(entry) = checked(self.tree.element_mut(position)) {
            return Some(entry.set_value(value));
        }
        self.expand_external(position, Entry::new(key, value));
        self.length += 1;
        None
    }

    fn expand_external(&mut self, position: Position, entry: Entry<K, V>) {
        checked(self.tree.set(position, TreeSlot::Internal(entry)));
        checked(self.tree.add_left(position, TreeSlot::External));
        checked(self.tree.add_right(position, TreeSlot::External));
    }

    /// Removes `key`, returning its value.
    ///
    /// A node with an external child is spliced out together with that
    /// sentinel. A node with two internal children takes over its in-order
    /// successor's entry, and the successor's node is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::map::OrderedTreeMap;
    ///
    /// let mut map: OrderedTreeMap<i32, char> =
    ///     [(5, 'e'), (3, 'c'), (8, 'h'), (1, 'a'), (4, 'd')].into_iter().collect();
    /// assert_eq!(map.remove(&3), Some('c'));
    /// assert_eq!(map.remove(&3), None);
    ///
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&1, &4, &5, &8]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        if self.is_external(position) {
            return None;
        }
        let left = self.left(position);
        let right = self.right(position);

        let removed = if self.is_external(left) {
            self.remove_leaf_and_branch(left)
        } else if self.is_external(right) {
            self.remove_leaf_and_branch(right)
        } else {
            tracing::trace!("removing node with two internal children through its successor");
            let successor = self.successor(position);
            let successor_leaf = self.left(successor);
            let successor_entry = self.remove_leaf_and_branch(successor_leaf);
            checked(self.tree.set(position, TreeSlot::Internal(successor_entry))).into_entry()
        };

        self.length -= 1;
        Some(removed.into_value())
    }

    /// Splices out the external `leaf` and then its parent, returning the
    /// parent's entry. The leaf's sibling takes the parent's place.
    fn remove_leaf_and_branch(&mut self, leaf: Position) -> Entry<K, V> {
        let Some(branch) = self.parent(leaf) else {
            unreachable!("{TREE_INVARIANT_PANIC_MESSAGE}")
        };
        checked(self.tree.remove(leaf));
        checked(self.tree.remove(branch)).into_entry()
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
        let position = self.tree_search(self.root(), key);
        if !self.is_external(position) {
            return Some(self.pair(position));
        }
        self.ascend(position, Ascent::FromLeft)
            .map(|ancestor| self.pair(ancestor))
    }

    /// Returns the entry with the largest key less than or equal to `key`.
    #[must_use]
    pub fn floor_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        if !self.is_external(position) {
            return Some(self.pair(position));
        }
        self.ascend(position, Ascent::FromRight)
            .map(|ancestor| self.pair(ancestor))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    #[must_use]
    pub fn lower_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        if !self.is_external(position) {
            if let Some(predecessor) = self.tree_max(self.left(position)) {
                return Some(self.pair(predecessor));
            }
        }
        self.ascend(position, Ascent::FromRight)
            .map(|ancestor| self.pair(ancestor))
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    #[must_use]
    pub fn higher_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree_search(self.root(), key);
        if !self.is_external(position) {
            if let Some(successor) = self.tree_min(self.right(position)) {
                return Some(self.pair(successor));
            }
        }
        self.ascend(position, Ascent::FromLeft)
            .map(|ancestor| self.pair(ancestor))
    }

    /// Returns the entries with keys in `[from_key, to_key)`, ascending.
    ///
    /// Subtrees lying entirely below `from_key` or above `to_key` are not
    /// visited.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidRange`] unless `from_key < to_key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::error::RangeError;
    /// use mapsmith::map::OrderedTreeMap;
    ///
    /// let map: OrderedTreeMap<i32, i32> = (0..10).map(|key| (key, key * key)).collect();
    /// let range = map.sub_map(&3, &6).unwrap();
    /// assert_eq!(range, vec![(&3, &9), (&4, &16), (&5, &25)]);
    ///
    /// assert_eq!(map.sub_map(&6, &3), Err(RangeError::InvalidRange));
    /// ```
    pub fn sub_map<Q>(&self, from_key: &Q, to_key: &Q) -> Result<Vec<(&K, &V)>, RangeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if from_key >= to_key {
            return Err(RangeError::InvalidRange);
        }
        let mut buffer = Vec::new();
        let mut pending: Vec<Position> = Vec::new();
        let mut current = Some(self.root());
        loop {
            while let Some(position) = current {
                let Some(entry) = self.entry(position) else {
                    break;
                };
                let candidate: &Q = entry.key().borrow();
                if candidate < from_key {
                    current = Some(self.right(position));
                } else {
                    pending.push(position);
                    current = Some(self.left(position));
                }
            }
            let Some(position) = pending.pop() else {
                break;
            };
            let (key, value) = self.pair(position);
            let candidate: &Q = key.borrow();
            if candidate >= to_key {
                break;
            }
            buffer.push((key, value));
            current = Some(self.right(position));
        }
        Ok(buffer)
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Ord, V> Map<K, V> for OrderedTreeMap<K, V> {
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

impl<K: Ord, V> SortedMap<K, V> for OrderedTreeMap<K, V> {
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

impl<K, V> Default for OrderedTreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.entries() == other.entries()
    }
}

impl<K: Eq, V: Eq> Eq for OrderedTreeMap<K, V> {}

impl_map_conversions!(OrderedTreeMap, [Ord]);

// =============================================================================
// Tests
// =============================================================================
