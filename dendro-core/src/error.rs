//! Error types for the dendro core library.
//!
//! Separates failures caused by caller input (empty data, mismatched
//! dimensions, invalid dissimilarities) from internal invariant violations
//! raised by the merge loop, and gives both a stable machine-readable code.

use std::fmt;

use thiserror::Error;

use crate::{heap::HeapError, metric::MetricError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
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
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while building or cutting a dendrogram.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterError {
    /// Agglomeration needs at least two points.
    #[error("hierarchical clustering needs at least 2 points (got {points})")]
    EmptyInput {
        /// Number of points supplied by the caller.
        points: usize,
    },
    /// The requested number of clusters cannot be produced from the data.
    #[error("cannot cut {points} points into {requested} clusters")]
    InvalidClusterCount {
        /// Number of clusters requested by the caller.
        requested: usize,
        /// Number of points in the dendrogram.
        points: usize,
    },
    /// Two points had different dimensionality.
    #[error(
        "points {left_point} and {right_point} have mismatched dimensions: left={left}, right={right}"
    )]
    DimensionMismatch {
        /// Index of the first point in the failing pair.
        left_point: usize,
        /// Index of the second point in the failing pair.
        right_point: usize,
        /// Dimensionality of the first point.
        left: usize,
        /// Dimensionality of the second point.
        right: usize,
    },
    /// The metric rejected a pair of points for a reason other than dimension.
    #[error("metric failed for points ({left_point}, {right_point}): {source}")]
    Metric {
        /// Index of the first point in the failing pair.
        left_point: usize,
        /// Index of the second point in the failing pair.
        right_point: usize,
        /// Underlying metric failure.
        #[source]
        source: MetricError,
    },
    /// A dissimilarity was negative, NaN or infinite.
    #[error("invalid dissimilarity {value} between {left} and {right}")]
    InvalidDistance {
        /// Row of the offending entry.
        left: usize,
        /// Column of the offending entry.
        right: usize,
        /// Offending value.
        value: f64,
    },
    /// A precomputed matrix row did not match the number of rows.
    #[error("distance matrix row {row} has {len} entries but the matrix has {order} rows")]
    MatrixNotSquare {
        /// Index of the malformed row.
        row: usize,
        /// Number of entries found in that row.
        len: usize,
        /// Number of rows in the matrix.
        order: usize,
    },
    /// A precomputed matrix was not symmetric.
    #[error("distance matrix is asymmetric at ({left}, {right})")]
    AsymmetricMatrix {
        /// Row of the asymmetric entry.
        left: usize,
        /// Column of the asymmetric entry.
        right: usize,
    },
    /// The priority queue rejected an operation, which indicates a logic error.
    #[error("internal priority queue failure: {0}")]
    Heap(#[from] HeapError),
    /// Merge loop bookkeeping became inconsistent, which indicates a logic error.
    #[error("merge loop invariant violated: {invariant} (index {index})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// Cluster representative involved in the violation.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ClusterError`] variants.
    enum ClusterErrorCode for ClusterError {
        /// Agglomeration needs at least two points.
        EmptyInput => EmptyInput { .. } => "CLUSTER_EMPTY_INPUT",
        /// The requested number of clusters cannot be produced from the data.
        InvalidClusterCount => InvalidClusterCount { .. } => "CLUSTER_INVALID_CLUSTER_COUNT",
        /// Two points had different dimensionality.
        DimensionMismatch => DimensionMismatch { .. } => "CLUSTER_DIMENSION_MISMATCH",
        /// The metric rejected a pair of points.
        MetricFailure => Metric { .. } => "CLUSTER_METRIC_FAILURE",
        /// A dissimilarity was negative, NaN or infinite.
        InvalidDistance => InvalidDistance { .. } => "CLUSTER_INVALID_DISTANCE",
        /// A precomputed matrix row did not match the number of rows.
        MatrixNotSquare => MatrixNotSquare { .. } => "CLUSTER_MATRIX_NOT_SQUARE",
        /// A precomputed matrix was not symmetric.
        AsymmetricMatrix => AsymmetricMatrix { .. } => "CLUSTER_ASYMMETRIC_MATRIX",
        /// The priority queue rejected an operation.
        InternalHeap => Heap(..) => "CLUSTER_INTERNAL_HEAP",
        /// Merge loop bookkeeping became inconsistent.
        InternalInvariant => InvariantViolation { .. } => "CLUSTER_INTERNAL_INVARIANT",
    }
}

impl ClusterError {
    /// Returns `true` when the error signals a bug in the engine rather than a
    /// problem with caller input.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{ClusterError, HeapError};
    ///
    /// assert!(ClusterError::Heap(HeapError::Empty).is_internal());
    /// assert!(!ClusterError::EmptyInput { points: 1 }.is_internal());
    /// ```
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Heap(_) | Self::InvariantViolation { .. })
    }

    /// Builds the error reported when `metric` fails on points
    /// `(left_point, right_point)`, lifting dimension mismatches into their
    /// dedicated variant.
    pub(crate) fn from_metric(left_point: usize, right_point: usize, source: MetricError) -> Self {
        match source {
            MetricError::DimensionMismatch { left, right } => Self::DimensionMismatch {
                left_point,
                right_point,
                left,
                right,
            },
            other => Self::Metric {
                left_point,
                right_point,
                source: other,
            },
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClusterError>;

/// Error type produced while scoring a partition.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The partition labels a different number of points than the data holds.
    #[error("partition labels {labels} points but the data has {points}")]
    LabelCountMismatch {
        /// Number of labelled points.
        labels: usize,
        /// Number of points in the data.
        points: usize,
    },
    /// A point carried a label outside the score matrix.
    #[error("point {point} has label {label} but only {clusters} clusters are scored")]
    LabelOutOfRange {
        /// Offending point.
        point: usize,
        /// Its label.
        label: usize,
        /// Number of scored clusters.
        clusters: usize,
    },
    /// Rows of a score matrix had different widths.
    #[error("score row {row} has {len} columns, expected {expected}")]
    RaggedScores {
        /// Offending row.
        row: usize,
        /// Its width.
        len: usize,
        /// Width of the first row.
        expected: usize,
    },
    /// Silhouettes need at least two clusters to compare against.
    #[error("silhouettes need at least 2 clusters (got {clusters})")]
    TooFewClusters {
        /// Number of clusters available.
        clusters: usize,
    },
    /// Silhouette-based selection needs at least three points.
    #[error("cluster-count selection needs at least 3 points (got {points})")]
    TooFewPoints {
        /// Number of points available.
        points: usize,
    },
    /// The metric rejected a point/centre pair.
    #[error("metric failed for point {point} and centre {center}: {source}")]
    Metric {
        /// Index of the point.
        point: usize,
        /// Index of the centre.
        center: usize,
        /// Underlying metric failure.
        #[source]
        source: MetricError,
    },
    /// Clustering a candidate partition failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

define_error_codes! {
    /// Stable codes describing [`ValidationError`] variants.
    enum ValidationErrorCode for ValidationError {
        /// The partition labels a different number of points than the data holds.
        LabelCountMismatch => LabelCountMismatch { .. } => "VALIDATION_LABEL_COUNT_MISMATCH",
        /// A point carried a label outside the score matrix.
        LabelOutOfRange => LabelOutOfRange { .. } => "VALIDATION_LABEL_OUT_OF_RANGE",
        /// Rows of a score matrix had different widths.
        RaggedScores => RaggedScores { .. } => "VALIDATION_RAGGED_SCORES",
        /// Silhouettes need at least two clusters.
        TooFewClusters => TooFewClusters { .. } => "VALIDATION_TOO_FEW_CLUSTERS",
        /// Selection needs at least three points.
        TooFewPoints => TooFewPoints { .. } => "VALIDATION_TOO_FEW_POINTS",
        /// The metric rejected a point/centre pair.
        MetricFailure => Metric { .. } => "VALIDATION_METRIC_FAILURE",
        /// Clustering a candidate partition failed.
        ClusterFailure => Cluster(..) => "VALIDATION_CLUSTER_FAILURE",
    }
}
