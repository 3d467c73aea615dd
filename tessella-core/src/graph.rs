//! Graph input abstractions for the Tessella core runtime.
//!
//! The detection engine never loads domain records itself; an external
//! collaborator maps its node labels to stable indices `0..n-1` once and
//! exposes the weighted adjacency through [`GraphSource`]. The snapshot
//! must stay immutable for the duration of one detection run.

use crate::error::GraphSourceError;

/// Abstraction over an immutable weighted undirected graph snapshot.
///
/// # Examples
/// ```
/// use tessella_core::{GraphSource, GraphSourceError};
///
/// struct Path3;
///
/// impl GraphSource for Path3 {
///     fn node_count(&self) -> usize { 3 }
///     fn name(&self) -> &str { "path3" }
///     fn edge_weight(&self, i: usize, j: usize) -> Result<f64, GraphSourceError> {
///         if i >= 3 { return Err(GraphSourceError::OutOfBounds { index: i }); }
///         if j >= 3 { return Err(GraphSourceError::OutOfBounds { index: j }); }
///         Ok(if i.abs_diff(j) == 1 { 1.0 } else { 0.0 })
///     }
/// }
///
/// let graph = Path3;
/// assert_eq!(graph.degree(1)?, 2.0);
/// assert_eq!(graph.total_edge_weight()?, 2.0);
/// # Ok::<(), GraphSourceError>(())
/// ```
pub trait GraphSource {
    /// Returns the number of nodes in the snapshot.
    fn node_count(&self) -> usize;

    /// Returns whether the snapshot contains no nodes.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Returns a human-readable name for diagnostics and error reports.
    fn name(&self) -> &str;

    /// Returns the weight of the edge between `i` and `j`, or `0.0` when no
    /// edge exists. Implementations must be symmetric.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::OutOfBounds`] for invalid indices.
    fn edge_weight(&self, i: usize, j: usize) -> Result<f64, GraphSourceError>;

    /// Returns the weighted degree of node `i`.
    ///
    /// The default implementation sums the node's adjacency row.
    /// Implementations that already hold degree data may override it.
    ///
    /// # Errors
    /// Returns any [`GraphSourceError`] surfaced by [`Self::edge_weight`].
    fn degree(&self, i: usize) -> Result<f64, GraphSourceError> {
        let mut total = 0.0;
        for j in 0..self.node_count() {
            total += self.edge_weight(i, j)?;
        }
        Ok(total)
    }

    /// Returns the total edge weight `m` (half the sum of all degrees).
    ///
    /// # Errors
    /// Returns any [`GraphSourceError`] surfaced by [`Self::degree`].
    fn total_edge_weight(&self) -> Result<f64, GraphSourceError> {
        let mut degree_sum = 0.0;
        for i in 0..self.node_count() {
            degree_sum += self.degree(i)?;
        }
        Ok(degree_sum / 2.0)
    }
}

/// Dense adjacency snapshot built from an undirected weighted edge list.
///
/// Convenient for callers that have already materialized their network and
/// for tests. Endpoints must lie within `0..n`, weights must be finite and
/// non-negative. Parallel edges accumulate.
///
/// # Examples
/// ```
/// use tessella_core::{AdjacencyGraph, GraphSource};
///
/// let graph = AdjacencyGraph::from_edges("triangle", 3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)])
///     .expect("edge list is valid");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.degree(0).expect("index in range"), 2.0);
/// assert_eq!(graph.total_edge_weight().expect("graph is valid"), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    name: String,
    order: usize,
    weights: Vec<f64>,
}

impl AdjacencyGraph {
    /// Builds a snapshot from a weighted edge list over `order` nodes.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::OutOfBounds`] when an endpoint is not in
    /// `0..order` and [`GraphSourceError::InvalidWeight`] when a weight is
    /// negative or non-finite.
    pub fn from_edges(
        name: &str,
        order: usize,
        edges: &[(usize, usize, f64)],
    ) -> Result<Self, GraphSourceError> {
        let mut weights = vec![0.0; order * order];
        for &(u, v, w) in edges {
            if u >= order {
                return Err(GraphSourceError::OutOfBounds { index: u });
            }
            if v >= order {
                return Err(GraphSourceError::OutOfBounds { index: v });
            }
            if !w.is_finite() || w < 0.0 {
                return Err(GraphSourceError::InvalidWeight {
                    left: u.min(v),
                    right: u.max(v),
                    weight: w,
                });
            }
            weights[u * order + v] += w;
            if u != v {
                weights[v * order + u] += w;
            }
        }
        Ok(Self {
            name: name.to_owned(),
            order,
            weights,
        })
    }

    /// Builds a snapshot from an unweighted edge list; every edge gets
    /// weight `1.0`.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::OutOfBounds`] when an endpoint is not in
    /// `0..order`.
    pub fn unweighted(
        name: &str,
        order: usize,
        edges: &[(usize, usize)],
    ) -> Result<Self, GraphSourceError> {
        let weighted: Vec<(usize, usize, f64)> =
            edges.iter().map(|&(u, v)| (u, v, 1.0)).collect();
        Self::from_edges(name, order, &weighted)
    }
}

impl GraphSource for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.order
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn edge_weight(&self, i: usize, j: usize) -> Result<f64, GraphSourceError> {
        if i >= self.order {
            return Err(GraphSourceError::OutOfBounds { index: i });
        }
        if j >= self.order {
            return Err(GraphSourceError::OutOfBounds { index: j });
        }
        Ok(self.weights[i * self.order + j])
    }
}
