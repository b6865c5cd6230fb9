//! Generation-checked handles into a [`LinkedBinaryTree`](super::LinkedBinaryTree).

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of tree identities. Identities are never reused within a process.
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one tree instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque handle naming one node of a [`LinkedBinaryTree`](super::LinkedBinaryTree).
///
/// A position records the tree that issued it, the arena slot of its node,
/// and the slot's generation at the time it was issued. Removing the node
/// bumps the generation, so every later use of the handle fails with
/// [`TreeError::InvalidPosition`](crate::error::TreeError::InvalidPosition),
/// even after the slot is recycled for a new node.
///
/// Positions are `Copy` and compare equal exactly when they name the same
/// live-or-dead node of the same tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) tree: TreeId,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "Position(tree: {}, slot: {}, generation: {})",
            self.tree.0, self.index, self.generation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_tree_ids_are_distinct() {
        let first = TreeId::next();
        let second = TreeId::next();
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_positions_differ_by_generation() {
        let tree = TreeId::next();
        let old = Position {
            tree,
            index: 0,
            generation: 0,
        };
        let recycled = Position {
            tree,
            index: 0,
            generation: 1,
        };
        assert_ne!(old, recycled);
    }
}
