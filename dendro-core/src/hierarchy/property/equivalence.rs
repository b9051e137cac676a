//! Property 1: merge heights agree with the definitional oracle.
//!
//! Lance–Williams updates and direct means round differently, so heights are
//! compared as sorted sequences within a relative tolerance.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{BuiltinMetric, DistanceMatrix, LinkageRule, MergeEngine};

use super::oracle::naive_average_linkage;
use super::types::{HierarchyFixture, PointLayout};

pub(super) const RELATIVE_TOLERANCE: f64 = 1e-9;

pub(super) fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= RELATIVE_TOLERANCE * expected.abs().max(1.0)
}

/// Runs the oracle equivalence property for `fixture`.
pub(super) fn run_oracle_equivalence_property(fixture: &HierarchyFixture) -> TestCaseResult {
    let matrix = DistanceMatrix::from_points(&fixture.points, &BuiltinMetric::Euclidean)
        .map_err(|err| TestCaseError::fail(format!("distance matrix failed: {err}")))?;
    let rows: Vec<Vec<f64>> = (0..matrix.order())
        .map(|row| matrix.row(row).collect())
        .collect();

    let dendrogram = MergeEngine::new(matrix, LinkageRule::Average)
        .run()
        .map_err(|err| {
            TestCaseError::fail(format!(
                "agglomeration failed: {err} (layout={:?}, points={})",
                fixture.layout,
                fixture.points.len(),
            ))
        })?;
    let oracle = naive_average_linkage(&rows);

    if dendrogram.len() != oracle.len() {
        return Err(TestCaseError::fail(format!(
            "merge count mismatch: engine={}, oracle={}",
            dendrogram.len(),
            oracle.len(),
        )));
    }

    let mut engine_heights: Vec<f64> = dendrogram.iter().map(|linkage| linkage.distance).collect();
    let mut oracle_heights: Vec<f64> = oracle.iter().map(|merge| merge.distance).collect();
    engine_heights.sort_by(f64::total_cmp);
    oracle_heights.sort_by(f64::total_cmp);
    for (position, (&actual, &expected)) in engine_heights.iter().zip(&oracle_heights).enumerate() {
        if !close(actual, expected) {
            return Err(TestCaseError::fail(format!(
                "height {position} differs: engine={actual}, oracle={expected} \
                 (layout={:?}, points={})",
                fixture.layout,
                fixture.points.len(),
            )));
        }
    }

    // Zero-distance merges among duplicates may group in any order.
    if fixture.layout != PointLayout::Duplicates {
        let mut engine_sizes: Vec<usize> = dendrogram.iter().map(|linkage| linkage.size).collect();
        let mut oracle_sizes: Vec<usize> = oracle.iter().map(|merge| merge.size).collect();
        engine_sizes.sort_unstable();
        oracle_sizes.sort_unstable();
        if engine_sizes != oracle_sizes {
            return Err(TestCaseError::fail(format!(
                "merge sizes differ: engine={engine_sizes:?}, oracle={oracle_sizes:?} \
                 (layout={:?})",
                fixture.layout,
            )));
        }
    }
    Ok(())
}
