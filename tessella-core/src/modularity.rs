//! Modularity matrix construction and scoring.
//!
//! The modularity matrix of a weighted graph is `B = A − k·kᵗ/2m`, where `A`
//! is the adjacency matrix, `k` the weighted degree vector, and `m` the total
//! edge weight. Its leading eigenpair drives the bipartition heuristic, and
//! the quadratic form `Q(s) = sᵗBs / 4m` scores any ±1 assignment.
//!
//! Submatrices for recursive sub-splitting are copies, never aliasing views:
//! restriction applies a diagonal self-correction (subtract each restricted
//! row's sum from its diagonal entry) so the block behaves as the modularity
//! matrix of the induced subgraph. The associated total weight is the sum of
//! the *original* degrees over the subset, which keeps scores consistent
//! relative to the parent graph's `m` across recursion levels.

use thiserror::Error;

use crate::{
    error::{GraphSourceError, define_error_codes},
    graph::GraphSource,
};

/// Errors returned by modularity matrix construction and scoring.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModularityError {
    /// The graph has no edges, so `B` is undefined.
    #[error("graph has no edges; the modularity matrix is undefined")]
    DegenerateGraph,
    /// The underlying graph source failed while materializing `A`.
    #[error(transparent)]
    GraphSource(#[from] GraphSourceError),
    /// The entry buffer length did not match the declared order.
    #[error("entry buffer has {entries} values but order {order} requires {expected}")]
    DimensionMismatch {
        /// Declared matrix order.
        order: usize,
        /// Number of entries supplied.
        entries: usize,
        /// Number of entries required (`order * order`).
        expected: usize,
    },
    /// An induced subset was empty.
    #[error("cannot restrict the modularity matrix to an empty subset")]
    EmptySubset,
    /// An induced subset referenced a row outside the matrix.
    #[error("subset index {index} is out of range for order {order}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Order of the matrix being restricted.
        order: usize,
    },
    /// An induced subset repeated an index.
    #[error("subset index {index} appears more than once")]
    DuplicateIndex {
        /// The repeated index.
        index: usize,
    },
    /// An assignment vector had the wrong length for this matrix.
    #[error("assignment has length {got} but the matrix order is {expected}")]
    AssignmentLength {
        /// Required assignment length.
        expected: usize,
        /// Length supplied by the caller.
        got: usize,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`ModularityError`].
    enum ModularityErrorCode for ModularityError {
        /// The graph has no edges.
        DegenerateGraph => DegenerateGraph => "MODULARITY_DEGENERATE_GRAPH",
        /// The underlying graph source failed.
        GraphSource => GraphSource(_) => "MODULARITY_GRAPH_SOURCE",
        /// The entry buffer length did not match the declared order.
        DimensionMismatch => DimensionMismatch { .. } => "MODULARITY_DIMENSION_MISMATCH",
        /// An induced subset was empty.
        EmptySubset => EmptySubset => "MODULARITY_EMPTY_SUBSET",
        /// An induced subset referenced a row outside the matrix.
        IndexOutOfRange => IndexOutOfRange { .. } => "MODULARITY_INDEX_OUT_OF_RANGE",
        /// An induced subset repeated an index.
        DuplicateIndex => DuplicateIndex { .. } => "MODULARITY_DUPLICATE_INDEX",
        /// An assignment vector had the wrong length.
        AssignmentLength => AssignmentLength { .. } => "MODULARITY_ASSIGNMENT_LENGTH",
    }
}

/// Dense modularity matrix with its degree vector and total weight.
///
/// The entry buffer is owned and contiguous (row-major). Matrices are
/// transient per recursion step; the detector drops them once a leaf is
/// finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ModularityMatrix {
    order: usize,
    total_weight: f64,
    degrees: Vec<f64>,
    entries: Vec<f64>,
}

impl ModularityMatrix {
    /// Builds the full-graph modularity matrix `B = A − k·kᵗ/2m`.
    ///
    /// # Errors
    /// Returns [`ModularityError::DegenerateGraph`] when the graph has no
    /// edges (`m == 0`) and propagates any [`GraphSourceError`] raised while
    /// reading the adjacency.
    pub fn from_graph<G: GraphSource>(graph: &G) -> Result<Self, ModularityError> {
        let order = graph.node_count();
        let mut degrees = Vec::with_capacity(order);
        for i in 0..order {
            degrees.push(graph.degree(i)?);
        }
        let total_weight = degrees.iter().sum::<f64>() / 2.0;
        if total_weight <= 0.0 {
            return Err(ModularityError::DegenerateGraph);
        }

        let mut entries = vec![0.0; order * order];
        for i in 0..order {
            for j in 0..order {
                entries[i * order + j] =
                    graph.edge_weight(i, j)? - degrees[i] * degrees[j] / (2.0 * total_weight);
            }
        }
        Ok(Self {
            order,
            total_weight,
            degrees,
            entries,
        })
    }

    /// Builds a matrix from a raw row-major entry buffer.
    ///
    /// Exposed for diagnostics and testing: [`Self::modularity`] works on any
    /// matrix, not only ones derived from a graph. A matrix built this way
    /// has no degree data, so it cannot be restricted with [`Self::induced`].
    ///
    /// # Errors
    /// Returns [`ModularityError::DimensionMismatch`] when the buffer length
    /// is not `order * order` and [`ModularityError::DegenerateGraph`] when
    /// `total_weight` is not positive.
    pub fn from_parts(
        order: usize,
        total_weight: f64,
        entries: Vec<f64>,
    ) -> Result<Self, ModularityError> {
        if entries.len() != order * order {
            return Err(ModularityError::DimensionMismatch {
                order,
                entries: entries.len(),
                expected: order * order,
            });
        }
        if total_weight <= 0.0 {
            return Err(ModularityError::DegenerateGraph);
        }
        Ok(Self {
            order,
            total_weight,
            degrees: vec![0.0; order],
            entries,
        })
    }

    /// Returns the matrix order (number of rows).
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the total weight used in the `1/4m` scaling of `Q`.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns the degree vector carried by this matrix.
    #[must_use]
    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    /// Returns the entry at `(row, col)`.
    #[must_use]
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.entries[row * self.order + col]
    }

    /// Restricts the matrix to `indices` with the diagonal self-correction.
    ///
    /// Each diagonal entry of the restricted block has that row's restricted
    /// sum subtracted, so the result behaves as the modularity matrix of the
    /// induced subgraph. The new total weight is the sum of the original
    /// degrees over the subset, deliberately not recomputed from the
    /// subgraph's own edges.
    ///
    /// # Errors
    /// Returns [`ModularityError::EmptySubset`],
    /// [`ModularityError::IndexOutOfRange`], or
    /// [`ModularityError::DuplicateIndex`] for malformed subsets, and
    /// [`ModularityError::DegenerateGraph`] when the subset carries no degree
    /// weight (e.g. isolated nodes, or a matrix built via
    /// [`Self::from_parts`]).
    pub fn induced(&self, indices: &[usize]) -> Result<Self, ModularityError> {
        if indices.is_empty() {
            return Err(ModularityError::EmptySubset);
        }
        let mut seen = vec![false; self.order];
        for &index in indices {
            if index >= self.order {
                return Err(ModularityError::IndexOutOfRange {
                    index,
                    order: self.order,
                });
            }
            if seen[index] {
                return Err(ModularityError::DuplicateIndex { index });
            }
            seen[index] = true;
        }

        let sub_order = indices.len();
        let mut degrees = Vec::with_capacity(sub_order);
        let mut entries = vec![0.0; sub_order * sub_order];
        for (row, &i) in indices.iter().enumerate() {
            degrees.push(self.degrees[i]);
            let mut row_sum = 0.0;
            for (col, &j) in indices.iter().enumerate() {
                let value = self.entries[i * self.order + j];
                entries[row * sub_order + col] = value;
                row_sum += value;
            }
            entries[row * sub_order + row] -= row_sum;
        }

        let total_weight = degrees.iter().sum::<f64>();
        if total_weight <= 0.0 {
            return Err(ModularityError::DegenerateGraph);
        }
        Ok(Self {
            order: sub_order,
            total_weight,
            degrees,
            entries,
        })
    }

    /// Computes the modularity score `Q(s) = sᵗBs / 4m` of a ±1 assignment.
    ///
    /// # Errors
    /// Returns [`ModularityError::AssignmentLength`] when `assignment` does
    /// not have one entry per node.
    pub fn modularity(&self, assignment: &[f64]) -> Result<f64, ModularityError> {
        if assignment.len() != self.order {
            return Err(ModularityError::AssignmentLength {
                expected: self.order,
                got: assignment.len(),
            });
        }
        let mut quadratic = 0.0;
        for (row, &s_i) in assignment.iter().enumerate() {
            let mut row_dot = 0.0;
            for (col, &s_j) in assignment.iter().enumerate() {
                row_dot += self.entries[row * self.order + col] * s_j;
            }
            quadratic += s_i * row_dot;
        }
        Ok(quadratic / (4.0 * self.total_weight))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::graph::AdjacencyGraph;

    fn two_triangles() -> AdjacencyGraph {
        AdjacencyGraph::unweighted(
            "two-triangles",
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        )
        .expect("edge list is valid")
    }

    #[test]
    fn from_graph_rejects_edgeless_graph() {
        let graph = AdjacencyGraph::unweighted("isolated", 3, &[]).expect("edge list is valid");

        let err = ModularityMatrix::from_graph(&graph).expect_err("no edges means no matrix");
        assert!(matches!(err, ModularityError::DegenerateGraph));
        assert_eq!(err.code().as_str(), "MODULARITY_DEGENERATE_GRAPH");
    }

    #[test]
    fn full_matrix_rows_sum_to_zero() {
        let matrix = ModularityMatrix::from_graph(&two_triangles()).expect("graph has edges");

        for row in 0..matrix.order() {
            let sum: f64 = (0..matrix.order()).map(|col| matrix.entry(row, col)).sum();
            assert!(sum.abs() < 1e-12, "row {row} sums to {sum}");
        }
    }

    #[test]
    fn trivial_assignment_scores_zero_on_full_matrix() {
        let matrix = ModularityMatrix::from_graph(&two_triangles()).expect("graph has edges");
        let all_one = vec![1.0; matrix.order()];

        let q = matrix.modularity(&all_one).expect("length matches");
        assert!(q.abs() < 1e-12, "expected Q(1) == 0, got {q}");
    }

    #[test]
    fn quadratic_form_matches_closed_form_check() {
        // From the defining double sum: Q = (3 + 3 + 9) / 4 = 3.75.
        let matrix = ModularityMatrix::from_parts(
            3,
            1.0,
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0],
        )
        .expect("dimensions match");

        let q = matrix.modularity(&[1.0, 1.0, 1.0]).expect("length matches");
        assert_eq!(q, 3.75);
    }

    #[test]
    fn from_parts_rejects_wrong_buffer_length() {
        let err = ModularityMatrix::from_parts(2, 1.0, vec![0.0; 3])
            .expect_err("3 entries cannot fill a 2x2 matrix");

        assert!(matches!(
            err,
            ModularityError::DimensionMismatch { expected: 4, .. }
        ));
    }

    #[test]
    fn induced_applies_diagonal_correction() {
        let matrix = ModularityMatrix::from_graph(&two_triangles()).expect("graph has edges");
        let sub = matrix.induced(&[0, 1, 2]).expect("subset is valid");

        // The corrected block must behave as its own modularity matrix:
        // every row sums to zero, so Q(1) == 0 on the subgraph.
        for row in 0..sub.order() {
            let sum: f64 = (0..sub.order()).map(|col| sub.entry(row, col)).sum();
            assert!(sum.abs() < 1e-12, "row {row} sums to {sum}");
        }
        // m_sub is the sum of original degrees over the subset: 2 + 2 + 3.
        assert_eq!(sub.total_weight(), 7.0);
        assert_eq!(sub.degrees(), &[2.0, 2.0, 3.0]);
    }

    #[rstest]
    #[case::empty(&[], ModularityErrorCode::EmptySubset)]
    #[case::out_of_range(&[0, 9], ModularityErrorCode::IndexOutOfRange)]
    #[case::duplicate(&[0, 1, 0], ModularityErrorCode::DuplicateIndex)]
    fn induced_rejects_malformed_subsets(
        #[case] subset: &[usize],
        #[case] expected: ModularityErrorCode,
    ) {
        let matrix = ModularityMatrix::from_graph(&two_triangles()).expect("graph has edges");

        let err = matrix.induced(subset).expect_err("subset is malformed");
        assert_eq!(err.code(), expected);
    }

    #[test]
    fn modularity_rejects_mismatched_assignment() {
        let matrix = ModularityMatrix::from_graph(&two_triangles()).expect("graph has edges");

        let err = matrix
            .modularity(&[1.0, -1.0])
            .expect_err("assignment is too short");
        assert!(matches!(
            err,
            ModularityError::AssignmentLength { expected: 6, got: 2 }
        ));
    }

    proptest! {
        /// The row-accumulated quadratic form must equal the explicit
        /// double-sum definition for arbitrary matrices and ±1 assignments.
        #[test]
        fn quadratic_form_matches_double_sum(
            order in 1_usize..6,
            seed in proptest::collection::vec(-5.0_f64..5.0, 36),
            signs in proptest::collection::vec(any::<bool>(), 6),
        ) {
            let entries: Vec<f64> = seed.iter().copied().take(order * order).collect();
            let assignment: Vec<f64> = signs
                .iter()
                .take(order)
                .map(|&up| if up { 1.0 } else { -1.0 })
                .collect();
            let matrix = ModularityMatrix::from_parts(order, 1.0, entries.clone())
                .expect("dimensions match");

            let mut double_sum = 0.0;
            for i in 0..order {
                for j in 0..order {
                    double_sum += entries[i * order + j] * assignment[i] * assignment[j];
                }
            }
            double_sum /= 4.0;

            let q = matrix.modularity(&assignment).expect("length matches");
            prop_assert!((q - double_sum).abs() < 1e-9);
        }

        /// Restricting a graph-derived matrix must leave every row of the
        /// corrected block summing to zero.
        #[test]
        fn induced_rows_sum_to_zero(keep in proptest::collection::vec(any::<bool>(), 6)) {
            let matrix = ModularityMatrix::from_graph(&two_triangles())
                .expect("graph has edges");
            let subset: Vec<usize> = keep
                .iter()
                .enumerate()
                .filter_map(|(i, &k)| k.then_some(i))
                .collect();
            prop_assume!(!subset.is_empty());

            let sub = matrix.induced(&subset).expect("subset is valid");
            for row in 0..sub.order() {
                let sum: f64 = (0..sub.order()).map(|col| sub.entry(row, col)).sum();
                prop_assert!(sum.abs() < 1e-9);
            }
        }
    }
}
