//! Flat partitions produced by cutting a dendrogram.
//!
//! Provides [`Classes`], the point-to-label mapping handed to callers, and
//! validation of the contiguous-label constraint it upholds.

use std::collections::HashSet;
use thiserror::Error;

/// A flat K-way partition of the input points.
///
/// # Examples
/// ```
/// use dendro_core::{Classes, ClusterId};
///
/// let classes = Classes::try_from_assignments(
///     vec![ClusterId::new(0), ClusterId::new(1), ClusterId::new(0)],
///     1.5,
/// )
/// .expect("labels are contiguous");
/// assert_eq!(classes.cluster_count(), 2);
/// assert_eq!(classes.sizes(), [2, 1]);
/// assert_eq!(classes.partitions(), [vec![0, 2], vec![1]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Classes {
    assignments: Vec<ClusterId>,
    cluster_count: usize,
    cost: f64,
}

/// Error returned when cluster identifiers are not contiguous starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousClusterIds {
    /// The assignments do not include cluster `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// The assignments skip identifiers.
    #[error("cluster identifiers must be contiguous without gaps")]
    Gap,
    /// The assignments contain duplicates that mask missing identifiers.
    #[error("cluster identifiers must not repeat identifiers")]
    Duplicate,
    /// The largest identifier leaves no room for a cluster count.
    #[error("cluster identifiers exceed the host pointer-width limit")]
    Overflow,
}

impl Classes {
    /// Attempts to build a partition from per-point labels and its cost.
    ///
    /// An empty `assignments` vector is accepted and yields
    /// `cluster_count == 0`.
    ///
    /// # Errors
    /// Returns [`NonContiguousClusterIds::MissingZero`] when the assignments
    /// omit cluster `0`, [`NonContiguousClusterIds::Gap`] or
    /// [`NonContiguousClusterIds::Duplicate`] when identifiers skip values, and
    /// [`NonContiguousClusterIds::Overflow`] when the largest identifier is
    /// `usize::MAX`.
    pub fn try_from_assignments(
        assignments: Vec<ClusterId>,
        cost: f64,
    ) -> Result<Self, NonContiguousClusterIds> {
        if assignments.is_empty() {
            return Ok(Self::from_parts(assignments, 0, cost));
        }

        let mut seen = HashSet::new();
        let mut max_id = 0usize;
        let mut has_duplicate = false;

        for id in &assignments {
            let value = id.get();
            if !seen.insert(value) {
                has_duplicate = true;
            }
            max_id = max_id.max(value);
        }

        if !seen.contains(&0) {
            return Err(NonContiguousClusterIds::MissingZero);
        }

        let expected = max_id
            .checked_add(1)
            .ok_or(NonContiguousClusterIds::Overflow)?;

        if seen.len() != expected {
            return Err(if has_duplicate {
                NonContiguousClusterIds::Duplicate
            } else {
                NonContiguousClusterIds::Gap
            });
        }

        Ok(Self::from_parts(assignments, expected, cost))
    }

    /// Builds a partition whose labels are already known to be contiguous.
    pub(crate) fn from_parts(assignments: Vec<ClusterId>, cluster_count: usize, cost: f64) -> Self {
        debug_assert!(
            assignments.iter().all(|id| id.get() < cluster_count),
            "labels must lie below the cluster count"
        );
        Self {
            assignments,
            cluster_count,
            cost,
        }
    }

    /// Returns the label of every point in input order.
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }

    /// Number of distinct clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Aggregate cost of the partition; lower is better.
    ///
    /// For a dendrogram cut this is the summed distance of the merges applied
    /// to reach the partition.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of labelled points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` when no points are labelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the label of `point`.
    #[must_use]
    pub fn label(&self, point: usize) -> Option<ClusterId> {
        self.assignments.get(point).copied()
    }

    /// Number of points in each cluster, indexed by label.
    #[must_use]
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.cluster_count];
        for id in &self.assignments {
            if let Some(size) = sizes.get_mut(id.get()) {
                *size += 1;
            }
        }
        sizes
    }

    /// Point indices belonging to each cluster, indexed by label.
    #[must_use]
    pub fn partitions(&self) -> Vec<Vec<usize>> {
        let mut partitions = vec![Vec::new(); self.cluster_count];
        for (point, id) in self.assignments.iter().enumerate() {
            if let Some(members) = partitions.get_mut(id.get()) {
                members.push(point);
            }
        }
        partitions
    }
}

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use dendro_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl std::fmt::Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
