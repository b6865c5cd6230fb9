//! Key hashing for [`ChainedHashMap`](super::ChainedHashMap).
//!
//! The hasher is chosen at compile time:
//!
//! - `fxhash` feature: `rustc_hash::FxHasher`
//! - `ahash` feature (without `fxhash`): `ahash::AHasher` with fixed keys
//! - otherwise: `std::collections::hash_map::DefaultHasher`
//!
//! Every choice is deterministic within a process, so a key always lands in
//! the same bucket for a given capacity.

use std::hash::{Hash, Hasher};

#[cfg(feature = "fxhash")]
type KeyHasher = rustc_hash::FxHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
type KeyHasher = ahash::AHasher;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
type KeyHasher = std::collections::hash_map::DefaultHasher;

/// Computes the 64-bit hash of a key.
pub(super) fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = KeyHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Reduces `hash` to a slot index of a table with `capacity` slots.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(super) const fn slot_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_hash_is_deterministic() {
        assert_eq!(compute_hash("key"), compute_hash("key"));
        assert_eq!(compute_hash(&42_u64), compute_hash(&42_u64));
    }

    #[rstest]
    #[case(0, 17, 0)]
    #[case(17, 17, 0)]
    #[case(20, 17, 3)]
    #[case(u64::MAX, 33, (u64::MAX % 33) as usize)]
    fn test_slot_index_stays_in_range(#[case] hash: u64, #[case] capacity: usize, #[case] expected: usize) {
        assert_eq!(slot_index(hash, capacity), expected);
        assert!(slot_index(hash, capacity) < capacity);
    }
}
