//! Partition quality measures and silhouette-driven cluster-count selection.
//!
//! A score matrix `S` has one row per point and one column per cluster.
//! [`segregations`] fills it with mean point-to-cluster distances;
//! [`separations`] with point-to-centre distances. [`silhouettes`] turns
//! either into per-point widths `(b - a) / max(a, b)`, where `a` is the score
//! of the point's own cluster and `b` the best other score. Widths computed
//! from separations are usually called shadows.

use tracing::{debug, info, instrument};

use crate::{
    clusterer::Clusterer,
    error::ValidationError,
    matrix::DistanceMatrix,
    metric::Metric,
    result::{Classes, ClusterId},
};

/// Convenient alias for validation results.
pub type Result<T> = core::result::Result<T, ValidationError>;

/// Outcome of a cluster-count search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    /// Selected number of clusters.
    pub k: usize,
    /// `1 - average silhouette` of the selected partition; lower is better.
    pub cost: f64,
}

/// Mean distance from every point to every cluster.
///
/// The mean over a point's own cluster excludes the point itself, so it
/// divides by `size - 1`; a singleton's own score is zero.
///
/// # Errors
/// Returns [`ValidationError::LabelCountMismatch`] when `classes` labels a
/// different number of points than `distances` holds.
pub fn segregations(distances: &DistanceMatrix, classes: &Classes) -> Result<Vec<Vec<f64>>> {
    let points = distances.order();
    if classes.len() != points {
        return Err(ValidationError::LabelCountMismatch {
            labels: classes.len(),
            points,
        });
    }
    let sizes = classes.sizes();
    let labels = classes.assignments();

    let scores = (0..points)
        .map(|point| {
            let mut sums = vec![0.0; classes.cluster_count()];
            for (distance, label) in distances.row(point).zip(labels) {
                sums[label.get()] += distance;
            }
            let own = labels[point].get();
            for (cluster, (sum, &size)) in sums.iter_mut().zip(&sizes).enumerate() {
                let members = if cluster == own { size - 1 } else { size };
                *sum = if members == 0 { 0.0 } else { *sum / members as f64 };
            }
            sums
        })
        .collect();
    Ok(scores)
}

/// Distance from every point to every cluster centre.
///
/// # Errors
/// Returns [`ValidationError::Metric`] when `metric` rejects a pair.
pub fn separations<P, C, M>(points: &[P], centers: &[C], metric: &M) -> Result<Vec<Vec<f64>>>
where
    P: AsRef<[f64]>,
    C: AsRef<[f64]>,
    M: Metric + ?Sized,
{
    points
        .iter()
        .enumerate()
        .map(|(point, values)| {
            centers
                .iter()
                .enumerate()
                .map(|(center, centre_values)| {
                    metric
                        .distance(values.as_ref(), centre_values.as_ref())
                        .map_err(|source| ValidationError::Metric {
                            point,
                            center,
                            source,
                        })
                })
                .collect()
        })
        .collect()
}

/// Per-point silhouette widths for the score matrix `scores`.
///
/// A width is zero when both the own and the best other score are zero.
///
/// # Errors
/// - [`ValidationError::LabelCountMismatch`] when `labels` and `scores`
///   differ in length.
/// - [`ValidationError::TooFewClusters`] when `scores` has fewer than two
///   columns.
/// - [`ValidationError::RaggedScores`] or [`ValidationError::LabelOutOfRange`]
///   for malformed input.
///
/// # Examples
/// ```
/// use dendro_core::{ClusterId, silhouettes};
///
/// let scores = vec![vec![1.0, 4.0], vec![3.0, 2.0]];
/// let labels = [ClusterId::new(0), ClusterId::new(0)];
/// let widths = silhouettes(&scores, &labels)?;
/// assert_eq!(widths, [0.75, -1.0 / 3.0]);
/// # Ok::<(), dendro_core::ValidationError>(())
/// ```
pub fn silhouettes(scores: &[Vec<f64>], labels: &[ClusterId]) -> Result<Vec<f64>> {
    if scores.len() != labels.len() {
        return Err(ValidationError::LabelCountMismatch {
            labels: labels.len(),
            points: scores.len(),
        });
    }
    let clusters = scores.first().map_or(0, Vec::len);
    if clusters < 2 {
        return Err(ValidationError::TooFewClusters { clusters });
    }

    scores
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(point, (row, label))| {
            if row.len() != clusters {
                return Err(ValidationError::RaggedScores {
                    row: point,
                    len: row.len(),
                    expected: clusters,
                });
            }
            let own = label.get();
            let within = *row.get(own).ok_or(ValidationError::LabelOutOfRange {
                point,
                label: own,
                clusters,
            })?;
            let nearest_other = row
                .iter()
                .enumerate()
                .filter(|&(cluster, _)| cluster != own)
                .map(|(_, &score)| score)
                .fold(f64::INFINITY, f64::min);
            let scale = within.max(nearest_other);
            Ok(if scale > 0.0 {
                (nearest_other - within) / scale
            } else {
                0.0
            })
        })
        .collect()
}

/// Silhouette widths of `classes` over `distances`, scoring points in
/// singleton clusters as zero.
///
/// # Errors
/// Propagates [`segregations`] and [`silhouettes`] failures.
pub fn silhouette_widths(distances: &DistanceMatrix, classes: &Classes) -> Result<Vec<f64>> {
    let scores = segregations(distances, classes)?;
    let mut widths = silhouettes(&scores, classes.assignments())?;
    let sizes = classes.sizes();
    for (width, label) in widths.iter_mut().zip(classes.assignments()) {
        if sizes.get(label.get()) == Some(&1) {
            *width = 0.0;
        }
    }
    Ok(widths)
}

/// Average silhouette width; zero for an empty slice.
#[must_use]
pub fn average(widths: &[f64]) -> f64 {
    if widths.is_empty() {
        0.0
    } else {
        widths.iter().sum::<f64>() / widths.len() as f64
    }
}

/// Picks the cluster count in `2..=max_k` whose partition has the largest
/// average silhouette width.
///
/// `max_k` is clamped to `m - 1`; zero means `m - 1`. Ties keep the smaller
/// count.
///
/// # Errors
/// Returns [`ValidationError::TooFewPoints`] for fewer than three points and
/// propagates clustering and scoring failures.
///
/// # Examples
/// ```
/// use dendro_core::{HierarchicalBuilder, split_by_average_silhouette};
///
/// let points = vec![
///     vec![0.0], vec![0.5], vec![1.0],
///     vec![20.0], vec![20.5], vec![21.0],
/// ];
/// let clusterer = HierarchicalBuilder::new().build(points)?;
/// let split = split_by_average_silhouette(&clusterer.distances()?, &clusterer, 0)?;
/// assert_eq!(split.k, 2);
/// assert!(split.cost < 0.1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "validation.split_by_average_silhouette",
    err,
    skip(distances, clusterer),
    fields(points = distances.order()),
)]
pub fn split_by_average_silhouette<C>(
    distances: &DistanceMatrix,
    clusterer: &C,
    max_k: usize,
) -> Result<Split>
where
    C: Clusterer + ?Sized,
{
    let points = distances.order();
    if points < 3 {
        return Err(ValidationError::TooFewPoints { points });
    }
    let limit = if max_k == 0 {
        points - 1
    } else {
        max_k.min(points - 1)
    };

    let mut best: Option<(usize, f64)> = None;
    for k in 2..=limit {
        let classes = clusterer.cluster(k)?;
        let score = average(&silhouette_widths(distances, &classes)?);
        debug!(k, average_silhouette = score, "scored candidate cluster count");
        if best.is_none_or(|(_, incumbent)| score > incumbent) {
            best = Some((k, score));
        }
    }

    let (k, score) = best.ok_or(ValidationError::TooFewClusters { clusters: limit })?;
    info!(k, average_silhouette = score, "selected cluster count");
    Ok(Split {
        k,
        cost: 1.0 - score,
    })
}
