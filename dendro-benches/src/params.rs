//! Benchmark parameter types.
//!
//! Each struct renders as the Criterion parameter label for one run.

use std::fmt;

/// Parameters for an agglomeration benchmark run.
#[derive(Clone, Debug)]
pub struct AgglomerationBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
}

impl fmt::Display for AgglomerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.point_count, self.dimensions)
    }
}

/// Parameters for a tree-cutting or selection benchmark run.
#[derive(Clone, Debug)]
pub struct CutBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Requested number of clusters.
    pub clusters: usize,
}

impl fmt::Display for CutBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.clusters)
    }
}

/// Parameters for an indexed heap benchmark run.
#[derive(Clone, Debug)]
pub struct HeapBenchParams {
    /// Number of entries held by the heap.
    pub entries: usize,
}

impl fmt::Display for HeapBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entries={}", self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_render_as_criterion_labels() {
        let agglomeration = AgglomerationBenchParams {
            point_count: 250,
            dimensions: 8,
        };
        let cut = CutBenchParams {
            point_count: 250,
            clusters: 4,
        };
        let heap = HeapBenchParams { entries: 1_000 };
        assert_eq!(agglomeration.to_string(), "n=250,d=8");
        assert_eq!(cut.to_string(), "n=250,k=4");
        assert_eq!(heap.to_string(), "entries=1000");
    }
}
