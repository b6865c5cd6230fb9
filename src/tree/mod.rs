//! A positional binary tree backed by a node arena.
//!
//! This module provides [`LinkedBinaryTree`], a generic binary tree whose
//! nodes are addressed through [`Position`] handles. The tree knows nothing
//! about ordering: it offers structural edits (add a child, replace a
//! payload, splice out a node of degree at most one, graft whole subtrees)
//! and traversals.
//!
//! # Internal Structure
//!
//! Nodes live in a `Vec` of slots. Each node stores its parent and children
//! as slot indices, which gives O(1) navigation in every direction without
//! reference cycles. Each slot carries a generation counter that is bumped
//! when its node is removed; a [`Position`] is only honoured while its
//! generation matches, so stale handles fail with
//! [`TreeError::InvalidPosition`] instead of aliasing a recycled node.
//!
//! # Examples
//!
//! ```rust
//! use mapsmith::tree::LinkedBinaryTree;
//!
//! let mut tree = LinkedBinaryTree::new();
//! let root = tree.add_root(2).unwrap();
//! let left = tree.add_left(root, 1).unwrap();
//! tree.add_right(root, 3).unwrap();
//!
//! let inorder: Vec<&i32> = tree.iter().collect();
//! assert_eq!(inorder, vec![&1, &2, &3]);
//!
//! // Splicing out a leaf
//! assert_eq!(tree.remove(left), Ok(1));
//! assert_eq!(tree.len(), 2);
//! assert!(tree.element(left).is_err());
//! ```

mod position;
mod traversal;

pub use position::Position;
pub use traversal::{Elements, Inorder, Postorder, Preorder};

use std::fmt;
use std::mem;

use smallvec::SmallVec;

use crate::error::TreeError;
use position::TreeId;
use traversal::InorderIndices;

/// Inline capacity of traversal stacks before they spill to the heap.
const TRAVERSAL_INLINE_DEPTH: usize = 32;

const LINK_INVARIANT_PANIC_MESSAGE: &str = "LinkedBinaryTree link points at a vacant slot";

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

#[derive(Clone)]
struct Node<E> {
    element: E,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<E> Node<E> {
    const fn leaf(element: E, parent: Option<usize>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }

    const fn child_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn num_children(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }
}

#[derive(Clone)]
struct Slot<E> {
    generation: u32,
    node: Option<Node<E>>,
}

// =============================================================================
// LinkedBinaryTree Definition
// =============================================================================

/// A generic binary tree of positions.
///
/// Every node except the root has exactly one parent that refers to it as
/// its left or right child. A node with no children is *external*; a node
/// with one or two children is *internal*.
///
/// # Time Complexity
///
/// | Operation                      | Complexity          |
/// |--------------------------------|---------------------|
/// | `root`/`parent`/`left`/`right` | O(1)                |
/// | `add_root`/`add_left`/`add_right` | O(1) amortized   |
/// | `set`                          | O(1)                |
/// | `remove`                       | O(1)                |
/// | `attach`                       | O(size of grafted trees) |
/// | `inorder`                      | O(n) total, O(h) space |
///
/// `attach` moves the donor nodes into this tree's arena, which costs one
/// step per grafted node.
pub struct LinkedBinaryTree<E> {
    id: TreeId,
    slots: Vec<Slot<E>>,
    vacant: Vec<usize>,
    root: Option<usize>,
    length: usize,
}

impl<E> LinkedBinaryTree<E> {
    /// Creates an empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::tree::LinkedBinaryTree;
    ///
    /// let tree: LinkedBinaryTree<i32> = LinkedBinaryTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.root(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TreeId::next(),
            slots: Vec::new(),
            vacant: Vec::new(),
            root: None,
            length: 0,
        }
    }

    /// Creates a tree holding a single root node.
    #[must_use]
    pub fn with_root(element: E) -> Self {
        let mut tree = Self::new();
        let index = tree.allocate(element, None);
        tree.root = Some(index);
        tree
    }

    /// Returns the number of nodes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree has no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the root position, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<Position> {
        self.root.map(|index| self.position_of(index))
    }

    /// Returns the parent of `position`, or `None` for the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn parent(&self, position: Position) -> Result<Option<Position>, TreeError> {
        let index = self.validate(position)?;
        Ok(self.linked(index).parent.map(|parent| self.position_of(parent)))
    }

    /// Returns the left child of `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn left(&self, position: Position) -> Result<Option<Position>, TreeError> {
        let index = self.validate(position)?;
        Ok(self.linked(index).left.map(|left| self.position_of(left)))
    }

    /// Returns the right child of `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn right(&self, position: Position) -> Result<Option<Position>, TreeError> {
        let index = self.validate(position)?;
        Ok(self.linked(index).right.map(|right| self.position_of(right)))
    }

    /// Returns the other child of `position`'s parent.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn sibling(&self, position: Position) -> Result<Option<Position>, TreeError> {
        let index = self.validate(position)?;
        let sibling = self.linked(index).parent.and_then(|parent| {
            let parent = self.linked(parent);
            if parent.left == Some(index) {
                parent.right
            } else {
                parent.left
            }
        });
        Ok(sibling.map(|sibling| self.position_of(sibling)))
    }

    /// Returns the children of `position`, left before right.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn children(&self, position: Position) -> Result<SmallVec<[Position; 2]>, TreeError> {
        let index = self.validate(position)?;
        let node = self.linked(index);
        Ok(node
            .left
            .into_iter()
            .chain(node.right)
            .map(|child| self.position_of(child))
            .collect())
    }

    /// Returns how many children `position` has.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn num_children(&self, position: Position) -> Result<usize, TreeError> {
        let index = self.validate(position)?;
        Ok(self.linked(index).num_children())
    }

    /// Returns `true` if `position` has at least one child.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn is_internal(&self, position: Position) -> Result<bool, TreeError> {
        Ok(self.num_children(position)? > 0)
    }

    /// Returns `true` if `position` has no children.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn is_external(&self, position: Position) -> Result<bool, TreeError> {
        Ok(self.num_children(position)? == 0)
    }

    /// Returns `true` if `position` is the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn is_root(&self, position: Position) -> Result<bool, TreeError> {
        let index = self.validate(position)?;
        Ok(self.root == Some(index))
    }

    /// Returns the payload stored at `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn element(&self, position: Position) -> Result<&E, TreeError> {
        let index = self.validate(position)?;
        Ok(&self.linked(index).element)
    }

    /// Returns a mutable reference to the payload stored at `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn element_mut(&mut self, position: Position) -> Result<&mut E, TreeError> {
        let index = self.validate(position)?;
        Ok(&mut self.linked_mut(index).element)
    }

    /// Number of edges between `position` and the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn depth(&self, position: Position) -> Result<usize, TreeError> {
        let mut walk = self.validate(position)?;
        let mut depth = 0;
        while let Some(parent) = self.linked(walk).parent {
            depth += 1;
            walk = parent;
        }
        Ok(depth)
    }

    /// Number of edges on the longest downward path from `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn height(&self, position: Position) -> Result<usize, TreeError> {
        let start = self.validate(position)?;
        let mut pending: SmallVec<[(usize, usize); TRAVERSAL_INLINE_DEPTH]> = SmallVec::new();
        pending.push((start, 0));
        let mut height = 0;
        while let Some((index, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.linked(index);
            pending.extend(node.left.into_iter().chain(node.right).map(|child| (child, depth + 1)));
        }
        Ok(height)
    }

    // =========================================================================
    // Structural Edits
    // =========================================================================

    /// Creates the root node of an empty tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::TreeNotEmpty`] if the tree already has nodes.
    pub fn add_root(&mut self, element: E) -> Result<Position, TreeError> {
        if !self.is_empty() {
            return Err(TreeError::TreeNotEmpty);
        }
        let index = self.allocate(element, None);
        self.root = Some(index);
        Ok(self.position_of(index))
    }

    /// Creates a new external node as the left child of `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] for a stale or foreign position,
    /// [`TreeError::ChildExists`] if the left slot is occupied.
    pub fn add_left(&mut self, position: Position, element: E) -> Result<Position, TreeError> {
        self.add_child(position, Side::Left, element)
    }

    /// Creates a new external node as the right child of `position`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] for a stale or foreign position,
    /// [`TreeError::ChildExists`] if the right slot is occupied.
    pub fn add_right(&mut self, position: Position, element: E) -> Result<Position, TreeError> {
        self.add_child(position, Side::Right, element)
    }

    fn add_child(&mut self, position: Position, side: Side, element: E) -> Result<Position, TreeError> {
        let parent = self.validate(position)?;
        if self.linked_mut(parent).child_mut(side).is_some() {
            return Err(TreeError::ChildExists);
        }
        let child = self.allocate(element, Some(parent));
        *self.linked_mut(parent).child_mut(side) = Some(child);
        Ok(self.position_of(child))
    }

    /// Replaces the payload at `position`, returning the previous payload.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] if `position` is stale or foreign.
    pub fn set(&mut self, position: Position, element: E) -> Result<E, TreeError> {
        Ok(mem::replace(self.element_mut(position)?, element))
    }

    /// Removes the node at `position` and returns its payload.
    ///
    /// The node's only child, if any, takes its place under the old parent
    /// (or becomes the root). `position` is invalid afterwards.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] for a stale or foreign position,
    /// [`TreeError::TwoChildren`] if the node has two children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapsmith::error::TreeError;
    /// use mapsmith::tree::LinkedBinaryTree;
    ///
    /// let mut tree = LinkedBinaryTree::with_root('b');
    /// let root = tree.root().unwrap();
    /// tree.add_left(root, 'a').unwrap();
    /// let right = tree.add_right(root, 'c').unwrap();
    ///
    /// assert_eq!(tree.remove(root), Err(TreeError::TwoChildren));
    /// assert_eq!(tree.remove(right), Ok('c'));
    /// assert_eq!(tree.remove(root), Ok('b'));
    /// assert_eq!(tree.root().map(|root| *tree.element(root).unwrap()), Some('a'));
    /// ```
    pub fn remove(&mut self, position: Position) -> Result<E, TreeError> {
        let index = self.validate(position)?;
        let node = self.linked(index);
        if node.num_children() == 2 {
            return Err(TreeError::TwoChildren);
        }
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child) = child {
            self.linked_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let parent = self.linked_mut(parent);
                if parent.left == Some(index) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }
            }
        }
        Ok(self.release(index).element)
    }

    /// Grafts `left` and `right` as the subtrees of the external node at
    /// `position`. Both donor trees are left empty.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidPosition`] for a stale or foreign position,
    /// [`TreeError::NotLeaf`] if the node already has children. Donors are
    /// untouched on error.
    pub fn attach(
        &mut self,
        position: Position,
        left: &mut Self,
        right: &mut Self,
    ) -> Result<(), TreeError> {
        let index = self.validate(position)?;
        if self.linked(index).num_children() != 0 {
            return Err(TreeError::NotLeaf);
        }
        let left_nodes = left.len();
        let right_nodes = right.len();
        self.graft(left, index, Side::Left);
        self.graft(right, index, Side::Right);
        tracing::trace!(left_nodes, right_nodes, "grafted subtrees onto leaf");
        Ok(())
    }

    /// Moves every node of `donor` under `parent` on `side`, then empties it.
    fn graft(&mut self, donor: &mut Self, parent: usize, side: Side) {
        if let Some(donor_root) = donor.root.take() {
            let mut pending: SmallVec<[(usize, usize, Side); TRAVERSAL_INLINE_DEPTH]> =
                SmallVec::new();
            pending.push((donor_root, parent, side));
            while let Some((donor_index, new_parent, side)) = pending.pop() {
                let Some(node) = donor
                    .slots
                    .get_mut(donor_index)
                    .and_then(|slot| slot.node.take())
                else {
                    continue;
                };
                let index = self.allocate(node.element, Some(new_parent));
                *self.linked_mut(new_parent).child_mut(side) = Some(index);
                if let Some(left) = node.left {
                    pending.push((left, index, Side::Left));
                }
                if let Some(right) = node.right {
                    pending.push((right, index, Side::Right));
                }
            }
        }
        donor.clear();
    }

    /// Removes every node. Positions issued before the call stay invalid
    /// even after new nodes are added.
    pub fn clear(&mut self) {
        self.id = TreeId::next();
        self.slots.clear();
        self.vacant.clear();
        self.root = None;
        self.length = 0;
    }

    // =========================================================================
    // Traversals
    // =========================================================================

    /// Returns the positions in in-order: left subtree, node, right subtree.
    ///
    /// The iterator is lazy and holds O(h) state where h is the height.
    /// Calling `inorder` again starts a fresh traversal.
    pub fn inorder(&self) -> Inorder<'_, E> {
        Inorder::new(self)
    }

    /// Returns every position, in in-order.
    pub fn positions(&self) -> Inorder<'_, E> {
        self.inorder()
    }

    /// Returns the positions in pre-order: node, left subtree, right subtree.
    pub fn preorder(&self) -> Preorder<'_, E> {
        Preorder::new(self)
    }

    /// Returns the positions in post-order: left subtree, right subtree, node.
    pub fn postorder(&self) -> Postorder<'_, E> {
        Postorder::new(self)
    }

    /// Returns the payloads in in-order.
    pub fn iter(&self) -> Elements<'_, E> {
        Elements::new(self)
    }

    /// Consumes the tree, returning its payloads in in-order.
    pub fn into_elements(self) -> Vec<E> {
        let order: Vec<usize> = InorderIndices::new(&self).collect();
        let mut slots = self.slots;
        order
            .into_iter()
            .filter_map(|index| slots[index].node.take().map(|node| node.element))
            .collect()
    }

    // =========================================================================
    // Arena Helpers
    // =========================================================================

    fn position_of(&self, index: usize) -> Position {
        Position {
            tree: self.id,
            index,
            generation: self.slots[index].generation,
        }
    }

    fn validate(&self, position: Position) -> Result<usize, TreeError> {
        if position.tree != self.id {
            return Err(TreeError::InvalidPosition);
        }
        self.slots
            .get(position.index)
            .filter(|slot| slot.generation == position.generation && slot.node.is_some())
            .map(|_| position.index)
            .ok_or(TreeError::InvalidPosition)
    }

    fn linked(&self, index: usize) -> &Node<E> {
        match self.slots.get(index).and_then(|slot| slot.node.as_ref()) {
            Some(node) => node,
            None => unreachable!("{LINK_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    fn linked_mut(&mut self, index: usize) -> &mut Node<E> {
        match self.slots.get_mut(index).and_then(|slot| slot.node.as_mut()) {
            Some(node) => node,
            None => unreachable!("{LINK_INVARIANT_PANIC_MESSAGE}"),
        }
    }

    fn allocate(&mut self, element: E, parent: Option<usize>) -> usize {
        let node = Node::leaf(element, parent);
        self.length += 1;
        if let Some(index) = self.vacant.pop() {
            self.slots[index].node = Some(node);
            index
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    fn release(&mut self, index: usize) -> Node<E> {
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let Some(node) = slot.node.take() else {
            unreachable!("{LINK_INVARIANT_PANIC_MESSAGE}")
        };
        self.vacant.push(index);
        self.length -= 1;
        node
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<E> Default for LinkedBinaryTree<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a distinct tree: positions issued by the original are
/// rejected by the clone.
impl<E: Clone> Clone for LinkedBinaryTree<E> {
    fn clone(&self) -> Self {
        Self {
            id: TreeId::next(),
            slots: self.slots.clone(),
            vacant: self.vacant.clone(),
            root: self.root,
            length: self.length,
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for LinkedBinaryTree<E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, E> IntoIterator for &'a LinkedBinaryTree<E> {
    type Item = &'a E;
    type IntoIter = Elements<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Builds
    /// ```text
    ///       d
    ///     /   \
    ///    b     f
    ///   / \   /
    ///  a   c e
    /// ```
    fn sample_tree() -> (LinkedBinaryTree<char>, [Position; 6]) {
        let mut tree = LinkedBinaryTree::new();
        let d = tree.add_root('d').unwrap();
        let b = tree.add_left(d, 'b').unwrap();
        let f = tree.add_right(d, 'f').unwrap();
        let a = tree.add_left(b, 'a').unwrap();
        let c = tree.add_right(b, 'c').unwrap();
        let e = tree.add_left(f, 'e').unwrap();
        (tree, [a, b, c, d, e, f])
    }

    fn labels(tree: &LinkedBinaryTree<char>, positions: impl Iterator<Item = Position>) -> String {
        positions.map(|position| *tree.element(position).unwrap()).collect()
    }

    #[rstest]
    fn test_with_root_has_single_external_node() {
        let tree = LinkedBinaryTree::with_root(0);
        let root = tree.root().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.is_external(root), Ok(true));
        assert_eq!(tree.parent(root), Ok(None));
    }

    #[rstest]
    fn test_traversal_orders() {
        let (tree, _) = sample_tree();
        assert_eq!(labels(&tree, tree.inorder()), "abcdef");
        assert_eq!(labels(&tree, tree.preorder()), "dbacfe");
        assert_eq!(labels(&tree, tree.postorder()), "acbefd");
    }

    #[rstest]
    fn test_sibling_and_children() {
        let (tree, [a, b, c, d, e, f]) = sample_tree();
        assert_eq!(tree.sibling(a), Ok(Some(c)));
        assert_eq!(tree.sibling(c), Ok(Some(a)));
        assert_eq!(tree.sibling(e), Ok(None));
        assert_eq!(tree.sibling(d), Ok(None));
        assert_eq!(tree.children(b).unwrap().as_slice(), &[a, c]);
        assert_eq!(tree.children(f).unwrap().as_slice(), &[e]);
    }

    #[rstest]
    fn test_depth_and_height() {
        let (tree, [a, _, _, d, _, f]) = sample_tree();
        assert_eq!(tree.depth(a), Ok(2));
        assert_eq!(tree.height(d), Ok(2));
        assert_eq!(tree.height(f), Ok(1));
        assert_eq!(tree.height(a), Ok(0));
    }

    #[rstest]
    fn test_recycled_slot_rejects_old_position() {
        let (mut tree, [a, b, ..]) = sample_tree();
        tree.remove(a).unwrap();
        let replacement = tree.add_left(b, 'z').unwrap();
        assert_eq!(replacement.index, a.index);
        assert_eq!(tree.element(a), Err(TreeError::InvalidPosition));
        assert_eq!(tree.element(replacement), Ok(&'z'));
    }

    #[rstest]
    fn test_into_elements_is_inorder() {
        let (tree, _) = sample_tree();
        assert_eq!(tree.into_elements(), vec!['a', 'b', 'c', 'd', 'e', 'f']);
    }

    #[rstest]
    fn test_clone_rejects_positions_of_original() {
        let (tree, [a, ..]) = sample_tree();
        let copy = tree.clone();
        assert_eq!(copy.element(a), Err(TreeError::InvalidPosition));
        assert_eq!(labels(&copy, copy.inorder()), "abcdef");
    }
}
