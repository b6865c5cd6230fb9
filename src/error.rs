//! Error types for structural tree edits and range queries.
//!
//! Missing keys are never errors: lookups report absence through `Option`.
//! The types here describe violated preconditions, detected synchronously
//! and surfaced to the caller immediately.

/// Errors raised by [`LinkedBinaryTree`](crate::tree::LinkedBinaryTree) operations.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "tree")] {
/// use mapsmith::error::TreeError;
/// use mapsmith::tree::LinkedBinaryTree;
///
/// let mut tree = LinkedBinaryTree::new();
/// let root = tree.add_root("root").unwrap();
/// assert_eq!(tree.add_root("again"), Err(TreeError::TreeNotEmpty));
///
/// tree.remove(root).unwrap();
/// assert_eq!(tree.element(root), Err(TreeError::InvalidPosition));
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TreeError {
    /// The position was issued by another tree, or its node has been removed.
    #[error("position does not belong to this tree or its node has been removed")]
    InvalidPosition,

    /// A root was requested for a tree that already has nodes.
    #[error("tree is not empty")]
    TreeNotEmpty,

    /// The requested child slot is already occupied.
    #[error("position already has a child on that side")]
    ChildExists,

    /// A node with two children cannot be spliced out directly.
    #[error("position has two children and cannot be removed directly")]
    TwoChildren,

    /// Subtrees can only be attached to an external node.
    #[error("position must be a leaf")]
    NotLeaf,
}

/// Errors raised by range queries on ordered maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum RangeError {
    /// The lower bound was not strictly less than the upper bound.
    #[error("range start must be strictly less than range end")]
    InvalidRange,
}

static_assertions::assert_impl_all!(TreeError: Send, Sync, Copy, std::error::Error);
static_assertions::assert_impl_all!(RangeError: Send, Sync, Copy, std::error::Error);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TreeError::InvalidPosition, "position does not belong to this tree or its node has been removed")]
    #[case(TreeError::TreeNotEmpty, "tree is not empty")]
    #[case(TreeError::ChildExists, "position already has a child on that side")]
    #[case(TreeError::TwoChildren, "position has two children and cannot be removed directly")]
    #[case(TreeError::NotLeaf, "position must be a leaf")]
    fn test_tree_error_display(#[case] error: TreeError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_range_error_display() {
        assert_eq!(
            RangeError::InvalidRange.to_string(),
            "range start must be strictly less than range end"
        );
    }

    #[rstest]
    fn test_errors_are_boxable() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(TreeError::NotLeaf);
        assert_eq!(boxed.to_string(), "position must be a leaf");
    }
}
