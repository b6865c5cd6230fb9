//! # mapsmith
//!
//! Key-value maps built from first principles behind one shared contract.
//!
//! ## Overview
//!
//! - **Positional Tree**: [`LinkedBinaryTree`](tree::LinkedBinaryTree), a
//!   generic binary tree addressed through generation-checked
//!   [`Position`](tree::Position) handles
//! - **Ordered Tree Map**: [`OrderedTreeMap`](map::OrderedTreeMap), an
//!   unbalanced binary search tree whose leaves are sentinel nodes
//! - **Chained Hash Map**: [`ChainedHashMap`](map::ChainedHashMap), a
//!   separate-chaining hash table that doubles (minus one) past a 0.75 load
//! - **Bucket Map**: [`UnorderedBucketMap`](map::UnorderedBucketMap), a
//!   linear-scan map needing only key equality
//! - **Sorted Array Map**: [`SortedArrayMap`](map::SortedArrayMap), a sorted
//!   vector located by binary search
//!
//! All maps implement [`Map`](map::Map); the two ordered ones also implement
//! [`SortedMap`](map::SortedMap) with floor, ceiling, lower, higher and
//! half-open range queries.
//!
//! ## Feature Flags
//!
//! - `tree`: Positional tree and tree map (default)
//! - `hash`: Chained hash map and bucket map (default)
//! - `sorted`: Sorted array map (default)
//! - `serde`: `Serialize`/`Deserialize` for every map
//! - `fxhash`: Hash keys with `rustc-hash`'s `FxHasher`
//! - `ahash`: Hash keys with `AHasher` (ignored when `fxhash` is enabled)
//! - `full`: Enable `tree`, `hash`, `sorted` and `serde`
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "tree")] {
//! use mapsmith::prelude::*;
//!
//! let mut map = OrderedTreeMap::new();
//! for key in [5, 3, 8, 1, 4] {
//!     map.put(key, key * 100);
//! }
//! map.remove(&3);
//!
//! assert_eq!(map.floor_entry(&4), Some((&4, &400)));
//! assert_eq!(map.ceiling_entry(&6), Some((&8, &800)));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the map contract, every enabled backend and the error types.
///
/// # Usage
///
/// ```rust
/// use mapsmith::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{RangeError, TreeError};
    pub use crate::map::{Entry, Map, SortedMap};

    #[cfg(feature = "hash")]
    pub use crate::map::{ChainedHashMap, UnorderedBucketMap};

    #[cfg(feature = "sorted")]
    pub use crate::map::SortedArrayMap;

    #[cfg(feature = "tree")]
    pub use crate::map::OrderedTreeMap;

    #[cfg(feature = "tree")]
    pub use crate::tree::{LinkedBinaryTree, Position};
}

pub mod error;
pub mod map;

#[cfg(feature = "tree")]
pub mod tree;
