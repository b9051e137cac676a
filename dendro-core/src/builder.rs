//! Builder for configuring hierarchical clustering runs.
//!
//! Collects the metric and linkage rule, validates the input points, and
//! constructs a [`HierarchicalClusterer`].

use tracing::warn;

use crate::{
    Result,
    clusterer::HierarchicalClusterer,
    error::ClusterError,
    hierarchy::LinkageRule,
    metric::{BuiltinMetric, Metric},
};

/// Configures and constructs [`HierarchicalClusterer`] instances.
///
/// Defaults to the Euclidean metric and average linkage.
///
/// # Examples
/// ```
/// use dendro_core::{BuiltinMetric, HierarchicalBuilder, LinkageRule};
///
/// let clusterer = HierarchicalBuilder::new()
///     .with_metric(BuiltinMetric::Manhattan)
///     .with_linkage(LinkageRule::Average)
///     .build(vec![vec![0.0, 0.0], vec![1.0, 1.0]])
///     .expect("two points of equal dimension are valid");
/// assert_eq!(clusterer.points().len(), 2);
/// assert_eq!(*clusterer.metric(), BuiltinMetric::Manhattan);
/// ```
#[derive(Debug, Clone)]
pub struct HierarchicalBuilder<M = BuiltinMetric> {
    metric: M,
    linkage: LinkageRule,
}

impl Default for HierarchicalBuilder {
    fn default() -> Self {
        Self {
            metric: BuiltinMetric::default(),
            linkage: LinkageRule::default(),
        }
    }
}

impl HierarchicalBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{BuiltinMetric, HierarchicalBuilder, LinkageRule};
    ///
    /// let builder = HierarchicalBuilder::new();
    /// assert_eq!(*builder.metric(), BuiltinMetric::Euclidean);
    /// assert_eq!(builder.linkage(), LinkageRule::Average);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Metric> HierarchicalBuilder<M> {
    /// Replaces the metric, which may be any [`Metric`] including a closure.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{HierarchicalBuilder, Metric, MetricError};
    ///
    /// let builder = HierarchicalBuilder::new().with_metric(
    ///     |left: &[f64], right: &[f64]| -> Result<f64, MetricError> {
    ///         dendro_core::chebyshev(left, right)
    ///     },
    /// );
    /// assert_eq!(builder.metric().name(), "custom");
    /// ```
    #[must_use]
    pub fn with_metric<N: Metric>(self, metric: N) -> HierarchicalBuilder<N> {
        HierarchicalBuilder {
            metric,
            linkage: self.linkage,
        }
    }

    /// Sets the rule used to recompute distances after each merge.
    #[must_use]
    pub fn with_linkage(mut self, linkage: LinkageRule) -> Self {
        self.linkage = linkage;
        self
    }

    /// Returns the configured metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Returns the configured linkage rule.
    #[must_use]
    pub fn linkage(&self) -> LinkageRule {
        self.linkage
    }

    /// Validates `points` and constructs a clusterer over them.
    ///
    /// # Errors
    /// Returns [`ClusterError::EmptyInput`] for fewer than two points and
    /// [`ClusterError::DimensionMismatch`] when a point's length differs from
    /// the first point's.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{ClusterError, HierarchicalBuilder};
    ///
    /// let err = HierarchicalBuilder::new()
    ///     .build(vec![vec![1.0]])
    ///     .expect_err("one point cannot be clustered");
    /// assert_eq!(err, ClusterError::EmptyInput { points: 1 });
    /// ```
    pub fn build(self, points: Vec<Vec<f64>>) -> Result<HierarchicalClusterer<M>> {
        if points.len() < 2 {
            warn!(points = points.len(), "rejecting input with fewer than two points");
            return Err(ClusterError::EmptyInput {
                points: points.len(),
            });
        }
        let expected = points.first().map_or(0, Vec::len);
        if let Some((index, point)) = points
            .iter()
            .enumerate()
            .find(|(_, point)| point.len() != expected)
        {
            return Err(ClusterError::DimensionMismatch {
                left_point: 0,
                right_point: index,
                left: expected,
                right: point.len(),
            });
        }
        Ok(HierarchicalClusterer::new(points, self.metric, self.linkage))
    }
}
