//! Result types for community detection runs.

use crate::hierarchy::HierarchyTree;

/// Output of a [`crate::CommunityDetector::detect`] invocation.
///
/// Carries the completed hierarchy, read-only after the run, plus the
/// dominant eigenvector of the full-graph decomposition — a top-level
/// ranking signal independent of the recursive refinement. The eigenvector
/// is absent when the whole graph was indivisible.
///
/// # Examples
/// ```
/// use tessella_core::{AdjacencyGraph, DetectorBuilder};
///
/// let graph = AdjacencyGraph::unweighted(
///     "two-triangles",
///     6,
///     &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
/// )
/// .expect("edge list is valid");
/// let result = DetectorBuilder::new()
///     .build()
///     .expect("defaults are valid")
///     .detect(&graph)
///     .expect("graph has edges");
///
/// assert_eq!(result.community_count(), 2);
/// let union: usize = result.partition_at(0).iter().map(Vec::len).sum();
/// assert_eq!(union, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    tree: HierarchyTree,
    leading_eigenvector: Option<Vec<f64>>,
}

impl DetectionResult {
    pub(crate) fn new(tree: HierarchyTree, leading_eigenvector: Option<Vec<f64>>) -> Self {
        Self {
            tree,
            leading_eigenvector,
        }
    }

    /// Returns the completed hierarchy.
    #[must_use]
    pub fn tree(&self) -> &HierarchyTree {
        &self.tree
    }

    /// Consumes the result, yielding the hierarchy.
    #[must_use]
    pub fn into_tree(self) -> HierarchyTree {
        self.tree
    }

    /// Returns the dominant eigenvector of the full-graph modularity matrix,
    /// when the root bisection produced one.
    #[must_use]
    pub fn leading_eigenvector(&self) -> Option<&[f64]> {
        self.leading_eigenvector.as_deref()
    }

    /// Returns the partition at cut depth `level`; see
    /// [`HierarchyTree::query`].
    #[must_use]
    pub fn partition_at(&self, level: usize) -> Vec<Vec<usize>> {
        self.tree.query(level)
    }

    /// Returns the number of final communities (the finest partition size).
    #[must_use]
    pub fn community_count(&self) -> usize {
        self.tree.leaf_count()
    }
}
