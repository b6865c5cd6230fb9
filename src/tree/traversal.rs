//! Lazy traversals over a [`LinkedBinaryTree`].
//!
//! Every traversal keeps an explicit stack bounded by the tree height, so
//! deep (degenerate) trees never recurse on the call stack.

use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::{LinkedBinaryTree, Position, TRAVERSAL_INLINE_DEPTH};

type Stack<T> = SmallVec<[T; TRAVERSAL_INLINE_DEPTH]>;

/// In-order walk over arena indices, shared by [`Inorder`] and [`Elements`].
pub(super) struct InorderIndices<'a, E> {
    tree: &'a LinkedBinaryTree<E>,
    stack: Stack<usize>,
    current: Option<usize>,
}

impl<'a, E> InorderIndices<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        Self {
            tree,
            stack: Stack::new(),
            current: tree.root,
        }
    }
}

impl<E> Iterator for InorderIndices<'_, E> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(index) = self.current {
            self.stack.push(index);
            self.current = self.tree.linked(index).left;
        }
        let index = self.stack.pop()?;
        self.current = self.tree.linked(index).right;
        Some(index)
    }
}

impl<E> FusedIterator for InorderIndices<'_, E> {}

// =============================================================================
// Public Iterators
// =============================================================================

/// In-order iterator over the positions of a [`LinkedBinaryTree`].
pub struct Inorder<'a, E> {
    walk: InorderIndices<'a, E>,
}

impl<'a, E> Inorder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        Self {
            walk: InorderIndices::new(tree),
        }
    }
}

impl<E> Iterator for Inorder<'_, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let index = self.walk.next()?;
        Some(self.walk.tree.position_of(index))
    }
}

impl<E> FusedIterator for Inorder<'_, E> {}

/// In-order iterator over the payloads of a [`LinkedBinaryTree`].
pub struct Elements<'a, E> {
    walk: InorderIndices<'a, E>,
}

impl<'a, E> Elements<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        Self {
            walk: InorderIndices::new(tree),
        }
    }
}

impl<'a, E> Iterator for Elements<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let index = self.walk.next()?;
        let tree = self.walk.tree;
        Some(&tree.linked(index).element)
    }
}

impl<E> FusedIterator for Elements<'_, E> {}

/// Pre-order iterator over the positions of a [`LinkedBinaryTree`].
pub struct Preorder<'a, E> {
    tree: &'a LinkedBinaryTree<E>,
    stack: Stack<usize>,
}

impl<'a, E> Preorder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<E> Iterator for Preorder<'_, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let index = self.stack.pop()?;
        let node = self.tree.linked(index);
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(self.tree.position_of(index))
    }
}

impl<E> FusedIterator for Preorder<'_, E> {}

/// Post-order iterator over the positions of a [`LinkedBinaryTree`].
pub struct Postorder<'a, E> {
    tree: &'a LinkedBinaryTree<E>,
    /// Pending nodes, flagged once their children have been scheduled.
    stack: Stack<(usize, bool)>,
}

impl<'a, E> Postorder<'a, E> {
    pub(super) fn new(tree: &'a LinkedBinaryTree<E>) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().map(|root| (root, false)).collect(),
        }
    }
}

impl<E> Iterator for Postorder<'_, E> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        loop {
            let (index, expanded) = self.stack.pop()?;
            if expanded {
                return Some(self.tree.position_of(index));
            }
            let node = self.tree.linked(index);
            self.stack.push((index, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
    }
}

impl<E> FusedIterator for Postorder<'_, E> {}
