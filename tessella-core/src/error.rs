//! Error types for the Tessella core library.
//!
//! Defines the error enums exposed by the public API and a convenient result
//! alias. Component-local errors (spectral, hierarchy, modularity) live in
//! their own modules; this module holds the graph input surface errors and
//! the top-level detection error.

use std::sync::Arc;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($spat:tt)* } )? $( ( $($tpat:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Returns the stable machine-readable representation of this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(
                        Self::$ErrVariant $( { $($spat)* } )? $( ( $($tpat)* ) )? =>
                            $CodeTy::$CodeVariant,
                    )+
                }
            }
        }
    };
}
pub(crate) use define_error_codes;

/// An error produced by [`crate::GraphSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphSourceError {
    /// Requested node index was outside the graph's bounds.
    #[error("node index {index} is out of bounds")]
    OutOfBounds {
        /// The requested node index that exceeded the graph bounds.
        index: usize,
    },
    /// An edge weight was negative or non-finite.
    #[error("invalid edge weight {weight} between nodes {left} and {right}")]
    InvalidWeight {
        /// Smaller endpoint of the offending edge.
        left: usize,
        /// Larger endpoint of the offending edge.
        right: usize,
        /// The offending weight value.
        weight: f64,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`GraphSourceError`].
    enum GraphSourceErrorCode for GraphSourceError {
        /// Requested node index was outside the graph's bounds.
        OutOfBounds => OutOfBounds { .. } => "GRAPH_SOURCE_OUT_OF_BOUNDS",
        /// An edge weight was negative or non-finite.
        InvalidWeight => InvalidWeight { .. } => "GRAPH_SOURCE_INVALID_WEIGHT",
    }
}

/// Error type produced when configuring or running [`crate::CommunityDetector`].
///
/// Per-leaf numerical trouble during the recursive loop is never surfaced
/// here: the detector finalizes the affected leaf and continues. Only
/// conditions that make the whole run impossible are reported.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetectionError {
    /// Maximum round count must be greater than zero.
    #[error("max_rounds must be at least 1 (got {got})")]
    InvalidMaxRounds {
        /// The invalid round cap supplied by the caller.
        got: usize,
    },
    /// The graph has no edges, so the modularity matrix is undefined.
    #[error("graph `{graph}` has no edges; community detection is undefined")]
    DegenerateGraph {
        /// Identifier for the edgeless graph.
        graph: Arc<str>,
    },
    /// A [`crate::GraphSource`] operation failed while building the matrix.
    #[error("graph `{graph}` failed: {error}")]
    GraphSource {
        /// Identifier for the graph that produced the error.
        graph: Arc<str>,
        #[source]
        /// Underlying graph source error bubbled up by the builder.
        error: GraphSourceError,
    },
    /// Building the full modularity matrix failed for a structural reason.
    #[error("modularity matrix construction for `{graph}` failed: {message}")]
    MatrixConstruction {
        /// Identifier for the graph whose matrix could not be built.
        graph: Arc<str>,
        /// Stable code from the underlying modularity error.
        code: Arc<str>,
        /// Human-readable description of the failure.
        message: Arc<str>,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`DetectionError`].
    enum DetectionErrorCode for DetectionError {
        /// Maximum round count must be greater than zero.
        InvalidMaxRounds => InvalidMaxRounds { .. } => "DETECTION_INVALID_MAX_ROUNDS",
        /// The graph has no edges.
        DegenerateGraph => DegenerateGraph { .. } => "DETECTION_DEGENERATE_GRAPH",
        /// A graph source operation failed.
        GraphSourceFailure => GraphSource { .. } => "DETECTION_GRAPH_SOURCE_FAILURE",
        /// Building the full modularity matrix failed for a structural reason.
        MatrixConstruction => MatrixConstruction { .. } => "DETECTION_MATRIX_CONSTRUCTION",
    }
}

impl DetectionError {
    /// Retrieve the inner [`GraphSourceErrorCode`] when the error originated
    /// in a [`crate::GraphSource`].
    #[must_use]
    pub const fn graph_source_code(&self) -> Option<GraphSourceErrorCode> {
        match self {
            Self::GraphSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DetectionError>;
