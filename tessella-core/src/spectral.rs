//! Spectral bisection by the leading eigenvector of the modularity matrix.
//!
//! The dominant eigenpair is computed with a shifted power iteration: adding
//! `σ·I` with `σ` the ∞-norm of `B` keeps every shifted eigenvalue
//! non-negative (Gershgorin), so the iteration's dominant-magnitude
//! eigenvalue corresponds to the eigenvalue of `B` with the largest real
//! part — the only eigenpair the bipartition heuristic needs. Eigenvalue
//! estimates come from the Rayleigh quotient of the normalized iterate.
//!
//! A non-positive leading eigenvalue means the group is indivisible by this
//! method; that is a recognized terminal condition, not an error. Failure to
//! converge within the iteration cap is reported as
//! [`SpectralError::NonConvergence`] so the caller can finalize the affected
//! leaf without aborting the rest of the hierarchy.

use thiserror::Error;

use crate::{error::define_error_codes, modularity::ModularityMatrix};

/// Leading eigenvalues at or below this threshold declare the group
/// indivisible.
pub const EIGENVALUE_TOLERANCE: f64 = 1e-8;

/// Power iteration stops once successive Rayleigh quotients differ by less
/// than this.
const CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Hard cap on power iterations, guarding against numerical oscillation.
const MAX_POWER_ITERATIONS: usize = 1_000;

/// Errors returned by the spectral bisector.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpectralError {
    /// The power iteration failed to converge within its iteration cap.
    #[error("power iteration did not converge after {iterations} iterations")]
    NonConvergence {
        /// Number of iterations performed before giving up.
        iterations: usize,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`SpectralError`].
    enum SpectralErrorCode for SpectralError {
        /// The power iteration failed to converge within its iteration cap.
        NonConvergence => NonConvergence { .. } => "SPECTRAL_NON_CONVERGENCE",
    }
}

/// Outcome of a bisection attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum BisectionOutcome {
    /// The leading eigenvalue is positive; a candidate split exists.
    Split(Bisection),
    /// The leading eigenvalue is non-positive; the group is indivisible.
    Indivisible,
}

/// A candidate two-way split derived from the leading eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct Bisection {
    eigenvalue: f64,
    eigenvector: Vec<f64>,
    assignment: Vec<f64>,
}

impl Bisection {
    /// Returns the leading eigenvalue.
    #[must_use]
    pub fn eigenvalue(&self) -> f64 {
        self.eigenvalue
    }

    /// Returns the normalized leading eigenvector.
    #[must_use]
    pub fn eigenvector(&self) -> &[f64] {
        &self.eigenvector
    }

    /// Returns the ±1 assignment derived from the eigenvector signs.
    /// Entries at or above zero land in the +1 group.
    #[must_use]
    pub fn assignment(&self) -> &[f64] {
        &self.assignment
    }

    /// Splits node positions into the +1 and −1 groups, in index order.
    #[must_use]
    pub fn groups(&self) -> (Vec<usize>, Vec<usize>) {
        groups_of(&self.assignment)
    }
}

/// Splits positions of a ±1 assignment into the +1 and −1 groups.
#[must_use]
pub fn groups_of(assignment: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut plus = Vec::new();
    let mut minus = Vec::new();
    for (index, &sign) in assignment.iter().enumerate() {
        if sign >= 0.0 {
            plus.push(index);
        } else {
            minus.push(index);
        }
    }
    (plus, minus)
}

/// Computes the leading eigenpair of `matrix` and the sign assignment.
///
/// Returns [`BisectionOutcome::Indivisible`] when the leading eigenvalue is
/// at or below [`EIGENVALUE_TOLERANCE`]. Subgraphs of fewer than two nodes
/// have no meaningful bisection; callers short-circuit before invoking this.
///
/// # Errors
/// Returns [`SpectralError::NonConvergence`] when the eigenvalue estimate
/// has not stabilized within the iteration cap.
pub fn bisect(matrix: &ModularityMatrix) -> Result<BisectionOutcome, SpectralError> {
    let order = matrix.order();
    if order == 0 {
        return Ok(BisectionOutcome::Indivisible);
    }

    let shift = infinity_norm(matrix);
    // Graded start vector: deterministic and not orthogonal to any
    // eigenvector with entries of uniform sign.
    let mut vector: Vec<f64> = (0..order)
        .map(|i| 1.0 + (i as f64) / (order as f64))
        .collect();
    normalize(&mut vector);
    let mut eigenvalue = rayleigh_quotient(matrix, &vector);

    for _ in 0..MAX_POWER_ITERATIONS {
        let mut next = multiply(matrix, &vector);
        for (out, &input) in next.iter_mut().zip(&vector) {
            *out += shift * input;
        }
        let norm = euclidean_norm(&next);
        if norm <= f64::EPSILON {
            // The shifted operator annihilated the iterate; the spectrum
            // offers no positive direction to split along.
            return Ok(BisectionOutcome::Indivisible);
        }
        for value in &mut next {
            *value /= norm;
        }

        let estimate = rayleigh_quotient(matrix, &next);
        let converged = (estimate - eigenvalue).abs() < CONVERGENCE_TOLERANCE;
        vector = next;
        eigenvalue = estimate;
        if converged {
            if eigenvalue <= EIGENVALUE_TOLERANCE {
                return Ok(BisectionOutcome::Indivisible);
            }
            let assignment: Vec<f64> = vector
                .iter()
                .map(|&value| if value >= 0.0 { 1.0 } else { -1.0 })
                .collect();
            return Ok(BisectionOutcome::Split(Bisection {
                eigenvalue,
                eigenvector: vector,
                assignment,
            }));
        }
    }

    Err(SpectralError::NonConvergence {
        iterations: MAX_POWER_ITERATIONS,
    })
}

fn infinity_norm(matrix: &ModularityMatrix) -> f64 {
    let order = matrix.order();
    let mut largest = 0.0_f64;
    for row in 0..order {
        let mut row_sum = 0.0;
        for col in 0..order {
            row_sum += matrix.entry(row, col).abs();
        }
        largest = largest.max(row_sum);
    }
    largest
}

fn multiply(matrix: &ModularityMatrix, vector: &[f64]) -> Vec<f64> {
    let order = matrix.order();
    let mut product = vec![0.0; order];
    for (row, out) in product.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (col, &value) in vector.iter().enumerate() {
            sum += matrix.entry(row, col) * value;
        }
        *out = sum;
    }
    product
}

/// Rayleigh quotient `vᵗBv / vᵗv` of a (near-)unit vector.
fn rayleigh_quotient(matrix: &ModularityMatrix, vector: &[f64]) -> f64 {
    let product = multiply(matrix, vector);
    let numerator: f64 = vector.iter().zip(&product).map(|(v, p)| v * p).sum();
    let denominator: f64 = vector.iter().map(|v| v * v).sum();
    if denominator <= f64::EPSILON {
        0.0
    } else {
        numerator / denominator
    }
}

fn euclidean_norm(vector: &[f64]) -> f64 {
    vector.iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn normalize(vector: &mut [f64]) {
    let norm = euclidean_norm(vector);
    if norm > f64::EPSILON {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::AdjacencyGraph, modularity::ModularityMatrix};

    #[test]
    fn finds_dominant_eigenpair_of_symmetric_pair() {
        // Eigenvalues of [[0, 1], [1, 0]] are ±1; the leading pair is
        // (1, [1, 1]/√2).
        let matrix = ModularityMatrix::from_parts(2, 1.0, vec![0.0, 1.0, 1.0, 0.0])
            .expect("dimensions match");

        let outcome = bisect(&matrix).expect("iteration converges");
        let BisectionOutcome::Split(bisection) = outcome else {
            panic!("expected a split, got {outcome:?}");
        };
        assert!((bisection.eigenvalue() - 1.0).abs() < 1e-6);
        let expected = 1.0 / 2.0_f64.sqrt();
        for &entry in bisection.eigenvector() {
            assert!((entry.abs() - expected).abs() < 1e-6);
        }
        assert_eq!(bisection.assignment().len(), 2);
    }

    #[test]
    fn declares_negative_definite_matrix_indivisible() {
        let matrix = ModularityMatrix::from_parts(2, 1.0, vec![-1.0, 0.0, 0.0, -2.0])
            .expect("dimensions match");

        let outcome = bisect(&matrix).expect("iteration converges");
        assert_eq!(outcome, BisectionOutcome::Indivisible);
    }

    #[test]
    fn declares_zero_matrix_indivisible() {
        let matrix =
            ModularityMatrix::from_parts(3, 1.0, vec![0.0; 9]).expect("dimensions match");

        let outcome = bisect(&matrix).expect("iteration converges");
        assert_eq!(outcome, BisectionOutcome::Indivisible);
    }

    #[test]
    fn splits_two_triangles_along_the_bridge() {
        let graph = AdjacencyGraph::unweighted(
            "two-triangles",
            6,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
        )
        .expect("edge list is valid");
        let matrix = ModularityMatrix::from_graph(&graph).expect("graph has edges");

        let outcome = bisect(&matrix).expect("iteration converges");
        let BisectionOutcome::Split(bisection) = outcome else {
            panic!("expected a split, got {outcome:?}");
        };
        assert!(bisection.eigenvalue() > 0.0);

        let (mut left, mut right) = bisection.groups();
        if left.contains(&3) {
            std::mem::swap(&mut left, &mut right);
        }
        assert_eq!(left, vec![0, 1, 2]);
        assert_eq!(right, vec![3, 4, 5]);
    }

    #[test]
    fn groups_send_zero_entries_to_the_plus_side() {
        let (plus, minus) = groups_of(&[0.0, -1.0, 1.0]);
        assert_eq!(plus, vec![0, 2]);
        assert_eq!(minus, vec![1]);
    }
}
