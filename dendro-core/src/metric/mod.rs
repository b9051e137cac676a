//! Point dissimilarity functions consumed when building a distance matrix.
//!
//! The engine only ever sees the [`Metric`] trait. Built-in Minkowski-family
//! metrics are exposed through [`BuiltinMetric`], and any closure with the
//! signature `Fn(&[f64], &[f64]) -> Result<f64, MetricError>` can be injected
//! instead. Every metric validates its inputs: mismatched dimensions are an
//! error, never a silent zero.

mod helpers;
mod lp;
mod types;

use core::fmt;

pub use self::lp::{chebyshev, euclidean, manhattan, minkowski, squared_euclidean};
pub use self::types::{MetricError, Result, VectorKind};

/// A pure, symmetric, non-negative dissimilarity between two points.
///
/// # Examples
/// ```
/// use dendro_core::{Metric, MetricError};
///
/// let hamming = |left: &[f64], right: &[f64]| -> Result<f64, MetricError> {
///     if left.len() != right.len() {
///         return Err(MetricError::DimensionMismatch { left: left.len(), right: right.len() });
///     }
///     Ok(left.iter().zip(right).filter(|(l, r)| l != r).count() as f64)
/// };
/// assert_eq!(hamming.distance(&[1.0, 2.0], &[1.0, 3.0])?, 1.0);
/// assert_eq!(hamming.name(), "custom");
/// # Ok::<(), MetricError>(())
/// ```
pub trait Metric {
    /// Returns a short human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Computes the dissimilarity between `left` and `right`.
    ///
    /// # Errors
    /// Implementations must return [`MetricError::DimensionMismatch`] when the
    /// vectors have different lengths.
    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64>;
}

impl<F> Metric for F
where
    F: Fn(&[f64], &[f64]) -> Result<f64>,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        self(left, right)
    }
}

/// Metrics shipped with the crate.
///
/// # Examples
/// ```
/// use dendro_core::{BuiltinMetric, Metric};
///
/// let metric = BuiltinMetric::Manhattan;
/// assert_eq!(metric.distance(&[0.0, 0.0], &[1.0, 2.0])?, 3.0);
/// assert_eq!(metric.name(), "manhattan");
/// # Ok::<(), dendro_core::MetricError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BuiltinMetric {
    /// Straight-line (L2) distance.
    #[default]
    Euclidean,
    /// Squared L2 distance; not a metric in the strict sense but useful for
    /// variance-like dissimilarities.
    SquaredEuclidean,
    /// Sum of absolute component differences (L1).
    Manhattan,
    /// Largest absolute component difference (L-infinity).
    Chebyshev,
    /// Lp distance of order `p`.
    Minkowski {
        /// Order of the norm; must be finite and at least one.
        p: f64,
    },
}

impl Metric for BuiltinMetric {
    fn name(&self) -> &str {
        match self {
            Self::Euclidean => "euclidean",
            Self::SquaredEuclidean => "squared-euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Minkowski { .. } => "minkowski",
        }
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64> {
        match *self {
            Self::Euclidean => euclidean(left, right),
            Self::SquaredEuclidean => squared_euclidean(left, right),
            Self::Manhattan => manhattan(left, right),
            Self::Chebyshev => chebyshev(left, right),
            Self::Minkowski { p } => minkowski(left, right, p),
        }
    }
}

impl fmt::Display for BuiltinMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minkowski { p } => write!(f, "minkowski(p={p})"),
            other => f.write_str(other.name()),
        }
    }
}
