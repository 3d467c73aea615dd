//! Binary hierarchy of node partitions produced by recursive bisection.
//!
//! A tree node is either a leaf holding an ordered list of original-graph
//! node indices or an internal node with exactly two children. Nodes live in
//! an arena and leaves are addressed through [`LeafId`] handles, so the
//! detection loop can replace a leaf with a subtree in place without any
//! self-referential ownership.
//!
//! Invariant: every split distributes a leaf's full index list into exactly
//! two non-empty children, so the union of all leaf lists at any cut depth is
//! a partition of the original node set — no duplicates, no omissions. Trees
//! grow unevenly: some branches terminate while siblings keep splitting, and
//! level queries must (and do) carry terminated leaves through unchanged.

use thiserror::Error;

use crate::error::define_error_codes;

/// Errors returned by hierarchy mutation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HierarchyError {
    /// The handle does not belong to this tree.
    #[error("node handle {node} is unknown to this tree")]
    UnknownHandle {
        /// The offending handle value.
        node: usize,
    },
    /// The handle refers to a node that has already been split.
    #[error("node {node} is internal and cannot be split again")]
    NotALeaf {
        /// The offending handle value.
        node: usize,
    },
    /// A split produced an empty side.
    #[error("both sides of a split must be non-empty")]
    EmptyGroup,
    /// The two sides of a split do not re-partition the leaf's indices.
    #[error("split groups must redistribute exactly the leaf's indices")]
    PartitionMismatch,
}

define_error_codes! {
    /// Machine-readable error codes for [`HierarchyError`].
    enum HierarchyErrorCode for HierarchyError {
        /// The handle does not belong to this tree.
        UnknownHandle => UnknownHandle { .. } => "HIERARCHY_UNKNOWN_HANDLE",
        /// The handle refers to a node that has already been split.
        NotALeaf => NotALeaf { .. } => "HIERARCHY_NOT_A_LEAF",
        /// A split produced an empty side.
        EmptyGroup => EmptyGroup => "HIERARCHY_EMPTY_GROUP",
        /// The two sides of a split do not re-partition the leaf's indices.
        PartitionMismatch => PartitionMismatch => "HIERARCHY_PARTITION_MISMATCH",
    }
}

/// Handle to a leaf in a [`HierarchyTree`] arena.
///
/// Handles are only meaningful for the tree that issued them, and become
/// stale once the leaf is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafId(usize);

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(Vec<usize>),
    Internal { left: usize, right: usize },
}

/// Binary hierarchy over original-graph node indices.
///
/// # Examples
/// ```
/// use tessella_core::HierarchyTree;
///
/// let (mut tree, root) = HierarchyTree::new(vec![0, 1, 2]);
/// tree.split(root, vec![0, 2], vec![1]).expect("groups partition the root");
/// assert_eq!(tree.query(0), vec![vec![0, 2], vec![1]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HierarchyTree {
    /// Creates a tree whose root is a single leaf over `indices`, returning
    /// the root's handle.
    #[must_use]
    pub fn new(indices: Vec<usize>) -> (Self, LeafId) {
        let tree = Self {
            nodes: vec![Node::Leaf(indices)],
            root: 0,
        };
        (tree, LeafId(0))
    }

    /// Replaces `leaf` in place with an internal node over two new leaves.
    ///
    /// `left` and `right` together must redistribute exactly the leaf's
    /// indices, and both must be non-empty.
    ///
    /// # Errors
    /// Returns [`HierarchyError::UnknownHandle`] for foreign handles,
    /// [`HierarchyError::NotALeaf`] for handles already split,
    /// [`HierarchyError::EmptyGroup`] when a side is empty, and
    /// [`HierarchyError::PartitionMismatch`] when indices are lost,
    /// invented, or duplicated.
    pub fn split(
        &mut self,
        leaf: LeafId,
        left: Vec<usize>,
        right: Vec<usize>,
    ) -> Result<(LeafId, LeafId), HierarchyError> {
        let LeafId(slot) = leaf;
        let indices = match self.nodes.get(slot) {
            None => return Err(HierarchyError::UnknownHandle { node: slot }),
            Some(Node::Internal { .. }) => return Err(HierarchyError::NotALeaf { node: slot }),
            Some(Node::Leaf(indices)) => indices,
        };
        if left.is_empty() || right.is_empty() {
            return Err(HierarchyError::EmptyGroup);
        }

        let mut original = indices.clone();
        let mut redistributed: Vec<usize> = left.iter().chain(right.iter()).copied().collect();
        original.sort_unstable();
        redistributed.sort_unstable();
        if original != redistributed {
            return Err(HierarchyError::PartitionMismatch);
        }

        let left_slot = self.nodes.len();
        self.nodes.push(Node::Leaf(left));
        let right_slot = self.nodes.len();
        self.nodes.push(Node::Leaf(right));
        self.nodes[slot] = Node::Internal {
            left: left_slot,
            right: right_slot,
        };
        Ok((LeafId(left_slot), LeafId(right_slot)))
    }

    /// Returns the indices held by a leaf.
    ///
    /// # Errors
    /// Returns [`HierarchyError::UnknownHandle`] for foreign handles and
    /// [`HierarchyError::NotALeaf`] for handles already split.
    pub fn leaf_indices(&self, leaf: LeafId) -> Result<&[usize], HierarchyError> {
        let LeafId(slot) = leaf;
        match self.nodes.get(slot) {
            None => Err(HierarchyError::UnknownHandle { node: slot }),
            Some(Node::Internal { .. }) => Err(HierarchyError::NotALeaf { node: slot }),
            Some(Node::Leaf(indices)) => Ok(indices),
        }
    }

    /// Returns the partition induced by cutting the tree at `level`.
    ///
    /// Level 0 yields the two root-level groups (or one group when the root
    /// never split). Each additional level descends one step along every
    /// branch that is still internal; branches that already terminated
    /// contribute their leaf unchanged. Levels beyond the deepest cut yield
    /// the fully expanded leaf partition. Traversal is always left subtree
    /// before right, so group order is stable across repeated queries.
    #[must_use]
    pub fn query(&self, level: usize) -> Vec<Vec<usize>> {
        let mut groups = Vec::new();
        self.collect(self.root, level.saturating_add(1), &mut groups);
        groups
    }

    /// Returns the number of leaves (the finest available partition size).
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }

    /// Returns the number of splits along the deepest branch.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, slot: usize) -> usize {
        match &self.nodes[slot] {
            Node::Leaf(_) => 0,
            Node::Internal { left, right } => {
                1 + self.depth_of(*left).max(self.depth_of(*right))
            }
        }
    }

    fn collect(&self, slot: usize, remaining: usize, groups: &mut Vec<Vec<usize>>) {
        match &self.nodes[slot] {
            Node::Leaf(indices) => groups.push(indices.clone()),
            Node::Internal { left, right } => {
                if remaining == 0 {
                    let mut flattened = Vec::new();
                    self.flatten(slot, &mut flattened);
                    groups.push(flattened);
                } else {
                    self.collect(*left, remaining - 1, groups);
                    self.collect(*right, remaining - 1, groups);
                }
            }
        }
    }

    fn flatten(&self, slot: usize, out: &mut Vec<usize>) {
        match &self.nodes[slot] {
            Node::Leaf(indices) => out.extend_from_slice(indices),
            Node::Internal { left, right } => {
                self.flatten(*left, out);
                self.flatten(*right, out);
            }
        }
    }
}

#[cfg(test)]
mod tests;
