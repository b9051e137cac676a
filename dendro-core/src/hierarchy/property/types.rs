//! Fixture types for the hierarchy property tests.

use test_strategy::Arbitrary;

/// Shape of the generated point set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum PointLayout {
    /// Points sampled uniformly in a bounding hypercube.
    #[weight(3)]
    Uniform,
    /// Tight groups around a handful of random centres.
    #[weight(3)]
    Blobs,
    /// One-dimensional points, where chaining effects are most visible.
    #[weight(2)]
    Line,
    /// Uniform data with exact duplicates, producing zero-distance merges.
    #[weight(1)]
    Duplicates,
}

/// Generated input for one property case.
#[derive(Clone, Debug)]
pub(super) struct HierarchyFixture {
    /// Points in input order; every point has the same dimension.
    pub points: Vec<Vec<f64>>,
    /// Layout used during generation.
    pub layout: PointLayout,
}
