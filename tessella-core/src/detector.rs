//! Recursive community detection over a weighted undirected graph.
//!
//! The detector drives the divisive loop: bisect the whole graph by the
//! leading eigenvector of its modularity matrix, refine the split by greedy
//! single-node flips, then recurse into each side through a work queue of
//! pending leaves until no split contributes positive modularity.
//!
//! Per-leaf trouble is absorbed at the leaf boundary: an indivisible
//! subgroup, a non-positive refined score, or a non-convergent eigen-solve
//! finalizes that leaf and the run continues. Only an edgeless graph (or a
//! graph source failure while building the full matrix) is fatal.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    error::DetectionError,
    graph::GraphSource,
    hierarchy::{HierarchyTree, LeafId},
    modularity::{ModularityError, ModularityMatrix},
    refine,
    result::DetectionResult,
    spectral::{self, BisectionOutcome},
    Result,
};

/// Refined splits must score strictly above zero to be accepted.
const MIN_SPLIT_MODULARITY: f64 = 0.0;

/// Entry point for running divisive spectral community detection.
///
/// # Examples
/// ```
/// use tessella_core::{AdjacencyGraph, DetectorBuilder};
///
/// // Two triangles joined by a single bridge edge.
/// let graph = AdjacencyGraph::unweighted(
///     "two-triangles",
///     6,
///     &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
/// )
/// .expect("edge list is valid");
///
/// let detector = DetectorBuilder::new().build().expect("defaults are valid");
/// let result = detector.detect(&graph).expect("graph has edges");
/// assert_eq!(result.partition_at(0).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CommunityDetector {
    max_rounds: NonZeroUsize,
}

impl CommunityDetector {
    pub(crate) fn new(max_rounds: NonZeroUsize) -> Self {
        Self { max_rounds }
    }

    /// Returns the bound on detection rounds.
    #[must_use]
    pub fn max_rounds(&self) -> NonZeroUsize {
        self.max_rounds
    }

    /// Runs the full recursive detection against `graph`.
    ///
    /// # Errors
    /// Returns [`DetectionError::DegenerateGraph`] when the graph has no
    /// edges and [`DetectionError::GraphSource`] when reading the adjacency
    /// fails. Numerical trouble below the root never aborts the run.
    pub fn detect<G: GraphSource>(&self, graph: &G) -> Result<DetectionResult> {
        self.detect_with_order(graph, graph.node_count())
    }

    #[instrument(
        name = "detector.detect",
        err,
        skip(self, graph),
        fields(graph = %graph.name(), nodes = order, max_rounds = %self.max_rounds),
    )]
    fn detect_with_order<G: GraphSource>(
        &self,
        graph: &G,
        order: usize,
    ) -> Result<DetectionResult> {
        let full = ModularityMatrix::from_graph(graph)
            .map_err(|error| Self::wrap_build_error(graph, error))?;

        let (mut tree, root) = HierarchyTree::new((0..order).collect());
        let root_bisection = match spectral::bisect(&full) {
            Ok(BisectionOutcome::Split(bisection)) => bisection,
            Ok(BisectionOutcome::Indivisible) => {
                debug!("whole graph is indivisible; one community");
                return Ok(DetectionResult::new(tree, None));
            }
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "root bisection failed");
                return Ok(DetectionResult::new(tree, None));
            }
        };
        let eigenvector = root_bisection.eigenvector().to_vec();

        // The root split comes straight from the eigenvector signs; the
        // refinement/acceptance gate applies to the recursive splits below.
        let (plus, minus) = root_bisection.groups();
        let mut pending = if plus.is_empty() || minus.is_empty() {
            debug!("root eigenvector has uniform sign; one community");
            Vec::new()
        } else {
            match tree.split(root, plus, minus) {
                Ok((left, right)) => vec![left, right],
                Err(error) => {
                    warn!(code = error.code().as_str(), %error, "root split rejected");
                    Vec::new()
                }
            }
        };

        let mut rounds = 0;
        while !pending.is_empty() && rounds < self.max_rounds.get() {
            rounds += 1;
            let mut next = Vec::new();
            for leaf in pending {
                next.extend(self.process_leaf(&mut tree, leaf, &full));
            }
            pending = next;
        }
        debug!(
            rounds,
            communities = tree.leaf_count(),
            "detection completed"
        );

        Ok(DetectionResult::new(tree, Some(eigenvector)))
    }

    /// Attempts to split one pending leaf; returns the new children to keep
    /// splitting, or nothing when the leaf is terminal.
    fn process_leaf(
        &self,
        tree: &mut HierarchyTree,
        leaf: LeafId,
        full: &ModularityMatrix,
    ) -> Vec<LeafId> {
        let indices = match tree.leaf_indices(leaf) {
            Ok(indices) => indices.to_vec(),
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "pending handle was invalid");
                return Vec::new();
            }
        };
        if indices.len() < 2 {
            return Vec::new();
        }

        let sub = match full.induced(&indices) {
            Ok(sub) => sub,
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "induced matrix failed; leaf finalized");
                return Vec::new();
            }
        };
        let bisection = match spectral::bisect(&sub) {
            Ok(BisectionOutcome::Split(bisection)) => bisection,
            Ok(BisectionOutcome::Indivisible) => return Vec::new(),
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "bisection failed; leaf finalized");
                return Vec::new();
            }
        };

        let refined = match refine::maximise(&sub, bisection.assignment().to_vec()) {
            Ok(refined) => refined,
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "refinement failed; leaf finalized");
                return Vec::new();
            }
        };
        if refined.modularity() <= MIN_SPLIT_MODULARITY {
            return Vec::new();
        }

        // Map local sub-indices back onto the original graph before growing
        // the tree.
        let assignment = refined.into_assignment();
        let (local_plus, local_minus) = spectral::groups_of(&assignment);
        if local_plus.is_empty() || local_minus.is_empty() {
            return Vec::new();
        }
        let left: Vec<usize> = local_plus.iter().map(|&i| indices[i]).collect();
        let right: Vec<usize> = local_minus.iter().map(|&i| indices[i]).collect();

        match tree.split(leaf, left, right) {
            Ok((left_leaf, right_leaf)) => vec![left_leaf, right_leaf],
            Err(error) => {
                warn!(code = error.code().as_str(), %error, "tree split rejected; leaf finalized");
                Vec::new()
            }
        }
    }

    fn wrap_build_error<G: GraphSource>(graph: &G, error: ModularityError) -> DetectionError {
        match error {
            ModularityError::DegenerateGraph => DetectionError::DegenerateGraph {
                graph: Arc::from(graph.name()),
            },
            ModularityError::GraphSource(error) => DetectionError::GraphSource {
                graph: Arc::from(graph.name()),
                error,
            },
            other => DetectionError::MatrixConstruction {
                graph: Arc::from(graph.name()),
                code: Arc::from(other.code().as_str()),
                message: Arc::from(other.to_string()),
            },
        }
    }
}
