//! Dendro core library: average-linkage agglomerative clustering.
//!
//! Points are turned into a [`DistanceMatrix`] with a [`Metric`], merged by
//! the [`MergeEngine`] into a [`Dendrogram`], and cut into a flat [`Classes`]
//! partition. [`HierarchicalBuilder`] wires these together, while
//! [`silhouette_widths`] and [`split_by_average_silhouette`] score partitions
//! and pick a cluster count.
//!
//! With the `metrics` feature enabled the engine records
//! `dendro_merges_total`, `dendro_lazy_repairs_total` and
//! `dendro_agglomeration_seconds`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod active_set;
mod builder;
mod clusterer;
mod error;
mod heap;
mod hierarchy;
mod matrix;
mod metric;
mod result;
#[cfg(test)]
mod test_utils;
mod validation;

pub use crate::{
    active_set::{ActiveSet, Iter as ActiveIter},
    builder::HierarchicalBuilder,
    clusterer::{Clusterer, HierarchicalClusterer, find_best},
    error::{ClusterError, ClusterErrorCode, Result, ValidationError, ValidationErrorCode},
    heap::{HeapEntry, HeapError, IndexedMinHeap},
    hierarchy::{Dendrogram, Linkage, LinkageRule, MergeEngine, NeighborRecord, NeighborTable},
    matrix::DistanceMatrix,
    metric::{
        BuiltinMetric, Metric, MetricError, VectorKind, chebyshev, euclidean, manhattan,
        minkowski, squared_euclidean,
    },
    result::{Classes, ClusterId, NonContiguousClusterIds},
    validation::{
        Split, average, segregations, separations, silhouette_widths, silhouettes,
        split_by_average_silhouette,
    },
};
