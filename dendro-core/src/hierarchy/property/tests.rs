//! Property-based test runners for the merge engine.
//!
//! Hosts the proptest runners for both properties, rstest cases pinned to
//! fixed seeds for each layout, and unit tests for the oracle itself.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::test_utils::{TWO_PAIRS_JOIN_DISTANCE, suite_proptest_config, two_pairs};
use crate::{BuiltinMetric, DistanceMatrix};

use super::equivalence::{close, run_oracle_equivalence_property};
use super::oracle::{OracleMerge, mean_pairwise, naive_average_linkage};
use super::strategies::{generate_fixture, hierarchy_fixture_strategy};
use super::structural::run_structural_invariants_property;
use super::types::PointLayout;

/// Generates an rstest-parameterised function that runs a property against
/// a fixed set of layouts and seeds.
macro_rules! parameterised_property_test {
    ($test_name:ident, $runner:path, $expectation:expr) => {
        #[rstest::rstest]
        #[case::uniform_42(PointLayout::Uniform, 42)]
        #[case::uniform_999(PointLayout::Uniform, 999)]
        #[case::blobs_42(PointLayout::Blobs, 42)]
        #[case::blobs_7777(PointLayout::Blobs, 7777)]
        #[case::line_42(PointLayout::Line, 42)]
        #[case::line_999(PointLayout::Line, 999)]
        #[case::duplicates_42(PointLayout::Duplicates, 42)]
        #[case::duplicates_999(PointLayout::Duplicates, 999)]
        fn $test_name(#[case] layout: PointLayout, #[case] seed: u64) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let fixture = generate_fixture(layout, &mut rng);
            $runner(&fixture).expect($expectation);
        }
    };
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn engine_matches_oracle(fixture in hierarchy_fixture_strategy()) {
        run_oracle_equivalence_property(&fixture)?;
    }

    #[test]
    fn history_and_cuts_are_well_formed(fixture in hierarchy_fixture_strategy()) {
        run_structural_invariants_property(&fixture)?;
    }
}

parameterised_property_test!(
    oracle_equivalence_rstest,
    run_oracle_equivalence_property,
    "engine must agree with the oracle"
);

parameterised_property_test!(
    structural_invariants_rstest,
    run_structural_invariants_property,
    "structural invariants must hold"
);

#[test]
fn oracle_joins_two_pairs() {
    let matrix = DistanceMatrix::from_points(&two_pairs(), &BuiltinMetric::Euclidean)
        .expect("points are valid");
    let rows: Vec<Vec<f64>> = (0..4).map(|row| matrix.row(row).collect()).collect();
    let merges = naive_average_linkage(&rows);
    assert_eq!(merges.len(), 3);
    assert_eq!(merges[0], OracleMerge { distance: 1.0, size: 2 });
    assert_eq!(merges[1], OracleMerge { distance: 1.0, size: 2 });
    assert_eq!(merges[2].size, 4);
    assert!(close(merges[2].distance, TWO_PAIRS_JOIN_DISTANCE));
}

#[test]
fn oracle_averages_every_cross_pair() {
    let rows = vec![
        vec![0.0, 1.0, 4.0, 6.0],
        vec![1.0, 0.0, 2.0, 8.0],
        vec![4.0, 2.0, 0.0, 3.0],
        vec![6.0, 8.0, 3.0, 0.0],
    ];
    assert_eq!(mean_pairwise(&rows, &[0, 1], &[2, 3]), 5.0);
    assert_eq!(mean_pairwise(&rows, &[3], &[0, 1, 2]), 17.0 / 3.0);
}

#[test]
fn oracle_handles_the_smallest_input() {
    let merges = naive_average_linkage(&[vec![0.0, 2.5], vec![2.5, 0.0]]);
    assert_eq!(merges, [OracleMerge { distance: 2.5, size: 2 }]);
}
