//! Greedy hill-climbing refinement of a two-way assignment.
//!
//! Each round evaluates, for every node, the modularity change from flipping
//! that node's sign alone, then commits the single best flip when it improves
//! the score by more than [`FLIP_TOLERANCE`]. Because `Q` is a quadratic
//! form, the per-node change has a closed-form delta, so a round costs
//! `O(n²)` instead of `O(n³)` while remaining observably identical to
//! re-scoring every candidate from scratch.
//!
//! Stopping policy: a flip is committed only when its gain strictly exceeds
//! the tolerance; [`MAX_FLIPS`] bounds the loop against numerical
//! oscillation near the optimum. The climb is strictly local and can stop in
//! a local optimum; that is accepted behavior.

use crate::modularity::{ModularityError, ModularityMatrix};

/// Minimum gain a single flip must deliver to be committed.
pub const FLIP_TOLERANCE: f64 = 1e-6;

/// Hard cap on committed flips per refinement run.
pub const MAX_FLIPS: usize = 100;

/// Result of a refinement run: the final assignment and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    assignment: Vec<f64>,
    modularity: f64,
}

impl Refinement {
    /// Returns the refined ±1 assignment.
    #[must_use]
    pub fn assignment(&self) -> &[f64] {
        &self.assignment
    }

    /// Consumes the refinement, yielding the assignment.
    #[must_use]
    pub fn into_assignment(self) -> Vec<f64> {
        self.assignment
    }

    /// Returns the modularity score of the refined assignment.
    #[must_use]
    pub fn modularity(&self) -> f64 {
        self.modularity
    }
}

/// Hill-climbs `assignment` against `matrix`, one sign flip at a time.
///
/// Returns the (possibly unchanged) assignment together with its modularity.
/// Re-running on the output is a fixed point.
///
/// # Errors
/// Returns [`ModularityError::AssignmentLength`] when `assignment` does not
/// have one entry per matrix row.
pub fn maximise(
    matrix: &ModularityMatrix,
    assignment: Vec<f64>,
) -> Result<Refinement, ModularityError> {
    // Scores the length check as a side effect.
    matrix.modularity(&assignment)?;
    let mut signs = assignment;

    for _ in 0..MAX_FLIPS {
        let Some((node, gain)) = best_flip(matrix, &signs) else {
            break;
        };
        if gain <= FLIP_TOLERANCE {
            break;
        }
        signs[node] = -signs[node];
    }

    let modularity = matrix.modularity(&signs)?;
    Ok(Refinement {
        assignment: signs,
        modularity,
    })
}

/// Finds the single flip with the greatest modularity gain.
fn best_flip(matrix: &ModularityMatrix, signs: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for node in 0..signs.len() {
        let gain = flip_gain(matrix, signs, node);
        match best {
            Some((_, current)) if gain <= current => {}
            _ => best = Some((node, gain)),
        }
    }
    best
}

/// Closed-form modularity change from flipping the sign of one node.
///
/// With `Q = sᵗBs / 4m`, flipping `s[k]` negates every cross term touching
/// row or column `k`, so `ΔQ = −s[k] · Σ_{j≠k} (B[k][j] + B[j][k]) · s[j] / 2m`.
/// The row+column form stays correct for non-symmetric diagnostic matrices.
fn flip_gain(matrix: &ModularityMatrix, signs: &[f64], node: usize) -> f64 {
    let mut cross = 0.0;
    for (j, &sign) in signs.iter().enumerate() {
        if j == node {
            continue;
        }
        cross += (matrix.entry(node, j) + matrix.entry(j, node)) * sign;
    }
    -signs[node] * cross / (2.0 * matrix.total_weight())
}
