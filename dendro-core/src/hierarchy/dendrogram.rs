//! Merge history produced by the agglomeration loop and its flat cuts.

use std::collections::HashMap;

use tracing::instrument;

use super::union_find::DisjointSet;
use crate::{
    error::{ClusterError, Result},
    result::{Classes, ClusterId},
};

/// One merge event.
///
/// `first` is retired by the merge; `second` survives and represents the
/// combined cluster from then on. `first < second` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linkage {
    /// Representative absorbed by the merge.
    pub first: usize,
    /// Representative that survives the merge.
    pub second: usize,
    /// Dissimilarity between the two clusters at the time of the merge.
    pub distance: f64,
    /// Number of original points in the merged cluster.
    pub size: usize,
}

/// Ordered merge history over `point_count` points.
///
/// A dendrogram produced by the merge engine holds exactly
/// `point_count - 1` linkages; entry `i` is the `i`-th merge performed.
///
/// # Examples
/// ```
/// use dendro_core::HierarchicalBuilder;
///
/// let points = vec![vec![0.0], vec![1.0], vec![5.0]];
/// let dendrogram = HierarchicalBuilder::new().build(points)?.dendrogram()?;
/// assert_eq!(dendrogram.len(), 2);
/// assert!(dendrogram.is_monotonic());
///
/// let classes = dendrogram.cut(2)?;
/// assert_eq!(classes.partitions(), [vec![0, 1], vec![2]]);
/// # Ok::<(), dendro_core::ClusterError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dendrogram {
    point_count: usize,
    linkages: Vec<Linkage>,
}

impl Dendrogram {
    pub(crate) fn new(point_count: usize, linkages: Vec<Linkage>) -> Self {
        Self {
            point_count,
            linkages,
        }
    }

    /// Number of points the history covers.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Number of merges recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.linkages.len()
    }

    /// Returns `true` when no merges are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linkages.is_empty()
    }

    /// Merges in emission order.
    #[must_use]
    pub fn linkages(&self) -> &[Linkage] {
        &self.linkages
    }

    /// Iterates merges in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Linkage> {
        self.linkages.iter()
    }

    /// Largest merge distance, i.e. the height of the root.
    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.linkages
            .iter()
            .map(|linkage| linkage.distance)
            .reduce(f64::max)
    }

    /// Returns `true` when merge distances never decrease.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.inversions().is_empty()
    }

    /// Positions `i` whose merge distance is smaller than merge `i - 1`'s.
    #[must_use]
    pub fn inversions(&self) -> Vec<usize> {
        self.linkages
            .windows(2)
            .enumerate()
            .filter_map(|(index, pair)| match pair {
                [previous, current] if current.distance < previous.distance => Some(index + 1),
                _ => None,
            })
            .collect()
    }

    /// Cuts the tree into `k` clusters by replaying the first
    /// `point_count - k` merges.
    ///
    /// Labels are numbered from zero in order of each cluster's smallest
    /// member. The cost is the summed distance of the replayed merges.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidClusterCount`] unless
    /// `1 <= k <= point_count`, and [`ClusterError::InvariantViolation`] when
    /// the history does not form a tree.
    #[instrument(
        name = "hierarchy.cut_tree",
        err,
        skip(self),
        fields(points = self.point_count),
    )]
    pub fn cut(&self, k: usize) -> Result<Classes> {
        if k == 0 || k > self.point_count {
            return Err(ClusterError::InvalidClusterCount {
                requested: k,
                points: self.point_count,
            });
        }
        let applied = self.point_count - k;
        let merges = self
            .linkages
            .get(..applied)
            .ok_or(ClusterError::InvalidClusterCount {
                requested: k,
                points: self.point_count,
            })?;

        let mut components = DisjointSet::new(self.point_count);
        let mut cost = 0.0;
        for linkage in merges {
            if linkage.first.max(linkage.second) >= self.point_count
                || !components.union(linkage.first, linkage.second)
            {
                return Err(ClusterError::InvariantViolation {
                    invariant: "each merge joins two distinct clusters",
                    index: linkage.first,
                });
            }
            cost += linkage.distance;
        }
        debug_assert_eq!(components.components(), k);

        let mut labels = HashMap::with_capacity(k);
        let assignments = (0..self.point_count)
            .map(|point| {
                let root = components.find(point);
                let next = labels.len();
                ClusterId::new(*labels.entry(root).or_insert(next))
            })
            .collect();
        Ok(Classes::from_parts(assignments, labels.len(), cost))
    }
}

impl<'a> IntoIterator for &'a Dendrogram {
    type Item = &'a Linkage;
    type IntoIter = std::slice::Iter<'a, Linkage>;

    fn into_iter(self) -> Self::IntoIter {
        self.linkages.iter()
    }
}
