//! Tessella core library.
//!
//! Divisive spectral community detection for weighted undirected networks:
//! recursively bisect a graph by the sign structure of the leading
//! eigenvector of its modularity matrix, polish each split with greedy
//! single-node flips, and record the result as a binary hierarchy queryable
//! at any cut depth.

mod builder;
mod detector;
mod error;
mod graph;
mod hierarchy;
mod modularity;
mod refine;
mod result;
mod spectral;

pub use crate::{
    builder::DetectorBuilder,
    detector::CommunityDetector,
    error::{
        DetectionError, DetectionErrorCode, GraphSourceError, GraphSourceErrorCode, Result,
    },
    graph::{AdjacencyGraph, GraphSource},
    hierarchy::{HierarchyError, HierarchyErrorCode, HierarchyTree, LeafId},
    modularity::{ModularityError, ModularityErrorCode, ModularityMatrix},
    refine::{maximise, Refinement, FLIP_TOLERANCE, MAX_FLIPS},
    result::DetectionResult,
    spectral::{
        bisect, groups_of, Bisection, BisectionOutcome, SpectralError, SpectralErrorCode,
        EIGENVALUE_TOLERANCE,
    },
};
