//! Property 2: structural invariants of the merge history and its cuts.
//!
//! For any fixture the history must hold `m - 1` merges, each joining two
//! live representatives with the smaller one retired, sizes must add up,
//! heights must never decrease, and every cut must yield exactly `k`
//! contiguous labels numbered by smallest member.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{BuiltinMetric, Dendrogram, HierarchicalBuilder};

use super::equivalence::RELATIVE_TOLERANCE;
use super::types::HierarchyFixture;

/// Runs the structural invariants property for `fixture`.
pub(super) fn run_structural_invariants_property(fixture: &HierarchyFixture) -> TestCaseResult {
    let dendrogram = HierarchicalBuilder::new()
        .with_metric(BuiltinMetric::Euclidean)
        .build(fixture.points.clone())
        .and_then(|clusterer| clusterer.dendrogram())
        .map_err(|err| TestCaseError::fail(format!("agglomeration failed: {err}")))?;
    let points = fixture.points.len();

    check_history(&dendrogram, points)?;
    for k in cut_counts(points) {
        check_cut(&dendrogram, k)?;
    }
    Ok(())
}

fn check_history(dendrogram: &Dendrogram, points: usize) -> TestCaseResult {
    if dendrogram.len() != points - 1 {
        return Err(TestCaseError::fail(format!(
            "expected {} merges, found {}",
            points - 1,
            dendrogram.len()
        )));
    }

    let mut sizes = vec![Some(1_usize); points];
    let mut previous = 0.0_f64;
    for (step, linkage) in dendrogram.iter().enumerate() {
        if linkage.first >= linkage.second {
            return Err(TestCaseError::fail(format!(
                "merge {step} retires the larger index: {linkage:?}"
            )));
        }
        let (Some(absorbed), Some(survivor)) = (sizes[linkage.first], sizes[linkage.second]) else {
            return Err(TestCaseError::fail(format!(
                "merge {step} touches a retired representative: {linkage:?}"
            )));
        };
        if absorbed + survivor != linkage.size {
            return Err(TestCaseError::fail(format!(
                "merge {step} reports size {} but joins {absorbed} and {survivor}",
                linkage.size
            )));
        }
        sizes[linkage.first] = None;
        sizes[linkage.second] = Some(linkage.size);

        if !linkage.distance.is_finite()
            || previous - linkage.distance > RELATIVE_TOLERANCE * previous.max(1.0)
        {
            return Err(TestCaseError::fail(format!(
                "merge {step} height {} follows {previous}",
                linkage.distance
            )));
        }
        previous = linkage.distance;
    }

    if sizes.last().copied().flatten() != Some(points) {
        return Err(TestCaseError::fail(format!(
            "the last index should survive holding every point: {sizes:?}"
        )));
    }
    Ok(())
}

fn cut_counts(points: usize) -> Vec<usize> {
    let mut counts = vec![1, (points / 2).max(1), points];
    counts.dedup();
    counts
}

fn check_cut(dendrogram: &Dendrogram, k: usize) -> TestCaseResult {
    let classes = dendrogram
        .cut(k)
        .map_err(|err| TestCaseError::fail(format!("cut({k}) failed: {err}")))?;
    if classes.cluster_count() != k {
        return Err(TestCaseError::fail(format!(
            "cut({k}) produced {} clusters",
            classes.cluster_count()
        )));
    }

    let mut next_label = 0;
    for (point, label) in classes.assignments().iter().enumerate() {
        match label.get() {
            seen if seen < next_label => {}
            fresh if fresh == next_label => next_label += 1,
            skipped => {
                return Err(TestCaseError::fail(format!(
                    "cut({k}) gives point {point} label {skipped} before {next_label}"
                )));
            }
        }
    }

    let expected: f64 = dendrogram
        .iter()
        .take(dendrogram.point_count() - k)
        .map(|linkage| linkage.distance)
        .sum();
    if classes.cost() != expected {
        return Err(TestCaseError::fail(format!(
            "cut({k}) cost {} differs from replayed heights {expected}",
            classes.cost()
        )));
    }
    Ok(())
}
