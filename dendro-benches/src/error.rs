//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use crate::source::SyntheticError;
use dendro_core::{ClusterError, HeapError, ValidationError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic point generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Distance matrix construction or agglomeration failed.
    #[error("clustering failed: {0}")]
    Cluster(#[from] ClusterError),
    /// Silhouette scoring failed.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Seeding the heap failed.
    #[error("heap operation failed: {0}")]
    Heap(#[from] HeapError),
}
