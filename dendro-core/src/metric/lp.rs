//! Minkowski-family metrics over dense `f64` vectors.

use super::helpers::{abs_differences, validated_pair};
use super::types::{MetricError, Result};

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
///
/// ```
/// use dendro_core::{MetricError, euclidean};
///
/// fn main() -> Result<(), MetricError> {
///     let distance = euclidean(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance - 50.0_f64.sqrt()).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`MetricError::ZeroLength`] when any input is empty.
/// - [`MetricError::DimensionMismatch`] when input lengths differ.
/// - [`MetricError::NonFinite`] when a value is NaN or infinite.
pub fn euclidean(left: &[f64], right: &[f64]) -> Result<f64> {
    squared_euclidean(left, right).map(f64::sqrt)
}

/// Computes the squared Euclidean distance between two vectors.
///
/// # Errors
///
/// Same as [`euclidean`].
pub fn squared_euclidean(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    Ok(abs_differences(&left, &right).map(|diff| diff * diff).sum())
}

/// Computes the Manhattan (L1) distance between two vectors.
///
/// # Errors
///
/// Same as [`euclidean`].
pub fn manhattan(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    Ok(abs_differences(&left, &right).sum())
}

/// Computes the Chebyshev (L-infinity) distance between two vectors.
///
/// # Errors
///
/// Same as [`euclidean`].
pub fn chebyshev(left: &[f64], right: &[f64]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    Ok(abs_differences(&left, &right).fold(0.0, f64::max))
}

/// Computes the Minkowski distance of order `p` between two vectors.
///
/// # Examples
///
/// ```
/// use dendro_core::{MetricError, minkowski};
///
/// fn main() -> Result<(), MetricError> {
///     let l1 = minkowski(&[0.0, 0.0], &[3.0, 4.0], 1.0)?;
///     let l2 = minkowski(&[0.0, 0.0], &[3.0, 4.0], 2.0)?;
///     assert!((l1 - 7.0).abs() < 1e-12);
///     assert!((l2 - 5.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Returns [`MetricError::InvalidExponent`] when `p` is not finite or is
/// below one, otherwise the same errors as [`euclidean`].
pub fn minkowski(left: &[f64], right: &[f64], p: f64) -> Result<f64> {
    if !p.is_finite() || p < 1.0 {
        return Err(MetricError::InvalidExponent { p });
    }
    let (left, right) = validated_pair(left, right)?;
    let sum: f64 = abs_differences(&left, &right).map(|diff| diff.powf(p)).sum();
    Ok(sum.powf(p.recip()))
}
