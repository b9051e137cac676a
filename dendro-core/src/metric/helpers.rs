//! Shared helpers for metric implementations.

use super::types::{MetricError, Point, Result, VectorKind};

/// Validates both vectors and ensures they share the same dimensionality.
pub(crate) fn validated_pair<'a>(
    left: &'a [f64],
    right: &'a [f64],
) -> Result<(Point<'a>, Point<'a>)> {
    // Report a mismatch before scanning values so callers see the structural
    // problem first.
    if !left.is_empty() && !right.is_empty() && left.len() != right.len() {
        return Err(MetricError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    let left = Point::new(left, VectorKind::Left)?;
    let right = Point::new(right, VectorKind::Right)?;
    debug_assert_eq!(left.dimension(), right.dimension());
    Ok((left, right))
}

/// Iterates the absolute component differences of a validated pair.
pub(crate) fn abs_differences<'a>(
    left: &'a Point<'a>,
    right: &'a Point<'a>,
) -> impl Iterator<Item = f64> + 'a {
    left.iter().zip(right.iter()).map(|(l, r)| (r - l).abs())
}
