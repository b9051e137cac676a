//! Dense symmetric dissimilarity matrix.
//!
//! The matrix is built once, either from raw points through a [`Metric`] or
//! from caller-supplied rows, and is then owned by the merge engine which
//! rewrites the survivor's row and column after every merge. Entries are
//! stored row-major in a single allocation; both triangles are kept so row
//! scans stay contiguous.

#[cfg(feature = "cpu")]
use rayon::prelude::*;
use tracing::{instrument, warn};

use crate::{
    error::{ClusterError, Result},
    metric::Metric,
};

/// Symmetric `order × order` matrix of non-negative finite dissimilarities.
///
/// # Examples
/// ```
/// use dendro_core::{BuiltinMetric, DistanceMatrix};
///
/// let points = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
/// let matrix = DistanceMatrix::from_points(&points, &BuiltinMetric::Euclidean)?;
/// assert_eq!(matrix.order(), 2);
/// assert_eq!(matrix.get(0, 1), Some(5.0));
/// assert_eq!(matrix.get(1, 0), Some(5.0));
/// assert_eq!(matrix.get(2, 0), None);
/// # Ok::<(), dendro_core::ClusterError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    order: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes every pairwise dissimilarity between `points` with `metric`.
    ///
    /// Rows are evaluated in parallel when the `cpu` feature is enabled; the
    /// result is identical either way.
    ///
    /// # Errors
    /// - [`ClusterError::DimensionMismatch`] when two points differ in length.
    /// - [`ClusterError::Metric`] when the metric rejects a pair.
    /// - [`ClusterError::InvalidDistance`] when the metric returns a negative
    ///   or non-finite value.
    #[instrument(
        name = "hierarchy.distance_matrix",
        err,
        skip(points, metric),
        fields(points = points.len(), metric = metric.name()),
    )]
    pub fn from_points<P, M>(points: &[P], metric: &M) -> Result<Self>
    where
        P: AsRef<[f64]> + Sync,
        M: Metric + Sync + ?Sized,
    {
        let order = points.len();
        let upper_row = |row: usize| -> Result<Vec<f64>> {
            let left = points[row].as_ref();
            points
                .iter()
                .enumerate()
                .skip(row + 1)
                .map(|(col, right)| {
                    let value = metric
                        .distance(left, right.as_ref())
                        .map_err(|source| ClusterError::from_metric(row, col, source))?;
                    checked_entry(row, col, value)
                })
                .collect()
        };

        #[cfg(feature = "cpu")]
        let rows: Vec<Vec<f64>> = (0..order)
            .into_par_iter()
            .map(upper_row)
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "cpu"))]
        let rows: Vec<Vec<f64>> = (0..order).map(upper_row).collect::<Result<_>>()?;

        let mut matrix = Self::zeroed(order);
        for (row, upper) in rows.into_iter().enumerate() {
            for (offset, value) in upper.into_iter().enumerate() {
                matrix.set_symmetric(row, row + 1 + offset, value);
            }
        }
        Ok(matrix)
    }

    /// Wraps precomputed dissimilarities.
    ///
    /// # Errors
    /// - [`ClusterError::MatrixNotSquare`] when a row length differs from the
    ///   number of rows.
    /// - [`ClusterError::InvalidDistance`] for negative or non-finite entries.
    /// - [`ClusterError::AsymmetricMatrix`] when `rows[i][j] != rows[j][i]`.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let order = rows.len();
        let mut values = Vec::with_capacity(order * order);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != order {
                return Err(ClusterError::MatrixNotSquare {
                    row,
                    len: entries.len(),
                    order,
                });
            }
            for (col, value) in entries.into_iter().enumerate() {
                values.push(checked_entry(row, col, value)?);
            }
        }
        let matrix = Self { order, values };
        for row in 0..order {
            for col in (row + 1)..order {
                if matrix.at(row, col) != matrix.at(col, row) {
                    warn!(row, col, "rejecting asymmetric distance matrix");
                    return Err(ClusterError::AsymmetricMatrix {
                        left: row,
                        right: col,
                    });
                }
            }
        }
        Ok(matrix)
    }

    fn zeroed(order: usize) -> Self {
        Self {
            order,
            values: vec![0.0; order * order],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the entry at `(row, col)`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.order && col < self.order {
            self.values.get(row * self.order + col).copied()
        } else {
            None
        }
    }

    /// Iterates the entries of `row`; empty outside the matrix.
    pub fn row(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        let start = row.min(self.order) * self.order;
        let end = if row < self.order {
            start + self.order
        } else {
            start
        };
        self.values.get(start..end).into_iter().flatten().copied()
    }

    /// Unchecked read for callers that only address live representatives.
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.order + col]
    }

    pub(crate) fn set_symmetric(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.order + col] = value;
        self.values[col * self.order + row] = value;
    }
}

fn checked_entry(row: usize, col: usize, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ClusterError::InvalidDistance {
            left: row,
            right: col,
            value,
        })
    }
}
