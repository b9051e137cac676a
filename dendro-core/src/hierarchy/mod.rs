//! Agglomerative hierarchical clustering.
//!
//! [`MergeEngine`] turns a [`DistanceMatrix`](crate::DistanceMatrix) into a
//! [`Dendrogram`] by repeatedly merging the closest pair of clusters and
//! recomputing the survivor's distances with a [`LinkageRule`]. A dendrogram
//! is cut into a flat partition with [`Dendrogram::cut`].
//!
//! The loop runs in `O(m² log m)` time for `m` points: nearest-neighbour
//! records are kept only for the smaller index of each pair, and stale records
//! are repaired lazily when they reach the top of the heap.

mod dendrogram;
mod engine;
mod linkage_rule;
mod neighbors;
mod union_find;

pub use self::dendrogram::{Dendrogram, Linkage};
pub use self::engine::MergeEngine;
pub use self::linkage_rule::LinkageRule;
pub use self::neighbors::{NeighborRecord, NeighborTable};

#[cfg(test)]
mod property;
