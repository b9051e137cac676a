//! Clusterer abstraction and the hierarchical implementation.
//!
//! [`Clusterer`] is the seam partition-producing algorithms plug into;
//! [`find_best`] runs one repeatedly and keeps the cheapest partition.

#[cfg(feature = "cpu")]
use rayon::prelude::*;
use tracing::instrument;

use crate::{
    Result,
    error::ClusterError,
    hierarchy::{Dendrogram, LinkageRule, MergeEngine},
    matrix::DistanceMatrix,
    metric::Metric,
    result::Classes,
};

/// Produces a flat partition of a fixed data set into `k` clusters.
pub trait Clusterer {
    /// Partitions the data into `k` clusters.
    ///
    /// # Errors
    /// Implementations return [`ClusterError::InvalidClusterCount`] when `k`
    /// cannot be honoured, and propagate any failure of the underlying
    /// algorithm.
    fn cluster(&self, k: usize) -> Result<Classes>;
}

/// Average-linkage agglomerative clusterer over a fixed set of points.
///
/// Construct it with [`HierarchicalBuilder`](crate::HierarchicalBuilder).
///
/// # Examples
/// ```
/// use dendro_core::{Clusterer, HierarchicalBuilder};
///
/// let points = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![10.0, 10.0], vec![10.0, 11.0]];
/// let clusterer = HierarchicalBuilder::new().build(points)?;
/// let classes = clusterer.cluster(2)?;
/// assert_eq!(classes.partitions(), [vec![0, 1], vec![2, 3]]);
/// assert!((classes.cost() - 2.0).abs() < 1e-12);
/// # Ok::<(), dendro_core::ClusterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HierarchicalClusterer<M> {
    points: Vec<Vec<f64>>,
    metric: M,
    linkage: LinkageRule,
}

impl<M: Metric> HierarchicalClusterer<M> {
    pub(crate) fn new(points: Vec<Vec<f64>>, metric: M, linkage: LinkageRule) -> Self {
        Self {
            points,
            metric,
            linkage,
        }
    }

    /// Input points in their original order.
    #[must_use]
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// The configured metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The configured linkage rule.
    #[must_use]
    pub fn linkage(&self) -> LinkageRule {
        self.linkage
    }
}

impl<M: Metric + Sync> HierarchicalClusterer<M> {
    /// Computes the pairwise dissimilarities of the input points.
    ///
    /// # Errors
    /// Propagates [`DistanceMatrix::from_points`] failures.
    pub fn distances(&self) -> Result<DistanceMatrix> {
        DistanceMatrix::from_points(&self.points, &self.metric)
    }

    /// Runs the full agglomeration and returns its merge history.
    ///
    /// # Errors
    /// Propagates metric failures and internal merge-loop failures.
    #[instrument(
        name = "hierarchy.dendrogram",
        err,
        skip(self),
        fields(points = self.points.len(), metric = %self.metric.name(), linkage = %self.linkage),
    )]
    pub fn dendrogram(&self) -> Result<Dendrogram> {
        MergeEngine::new(self.distances()?, self.linkage).run()
    }
}

impl<M: Metric + Sync> Clusterer for HierarchicalClusterer<M> {
    #[instrument(
        name = "hierarchy.cluster",
        err,
        skip(self),
        fields(points = self.points.len(), metric = %self.metric.name()),
    )]
    fn cluster(&self, k: usize) -> Result<Classes> {
        let points = self.points.len();
        if k == 0 || k > points {
            return Err(ClusterError::InvalidClusterCount {
                requested: k,
                points,
            });
        }
        self.dendrogram()?.cut(k)
    }
}

/// Runs `clusterer` `repeats` times and returns the lowest-cost partition.
///
/// Repeats run in parallel when the `cpu` feature is enabled. A `repeats`
/// value of zero is treated as one.
///
/// # Errors
/// Returns the first failure reported by any repeat.
///
/// # Examples
/// ```
/// use dendro_core::{HierarchicalBuilder, find_best};
///
/// let clusterer = HierarchicalBuilder::new().build(vec![vec![0.0], vec![1.0], vec![9.0]])?;
/// let best = find_best(&clusterer, 2, 4)?;
/// assert_eq!(best.cluster_count(), 2);
/// # Ok::<(), dendro_core::ClusterError>(())
/// ```
#[instrument(name = "clusterer.find_best", err, skip(clusterer))]
pub fn find_best<C>(clusterer: &C, k: usize, repeats: usize) -> Result<Classes>
where
    C: Clusterer + Sync + ?Sized,
{
    let repeats = repeats.max(1);

    #[cfg(feature = "cpu")]
    let candidates: Vec<Classes> = (0..repeats)
        .into_par_iter()
        .map(|_| clusterer.cluster(k))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "cpu"))]
    let candidates: Vec<Classes> = (0..repeats)
        .map(|_| clusterer.cluster(k))
        .collect::<Result<_>>()?;

    candidates
        .into_iter()
        .min_by(|left, right| left.cost().total_cmp(&right.cost()))
        .ok_or(ClusterError::InvariantViolation {
            invariant: "at least one repeat produced a partition",
            index: repeats,
        })
}
