//! Shared test utilities for `dendro-core`.

use dendro_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `DENDRO_PBT_*`
/// interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        max_shrink_iters: profile.max_shrink_iters(),
        ..ProptestConfig::default()
    }
}

/// The two well-separated pairs used throughout the hierarchy tests.
#[must_use]
pub(crate) fn two_pairs() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ]
}

/// Average Euclidean distance between the pairs in [`two_pairs`].
pub(crate) const TWO_PAIRS_JOIN_DISTANCE: f64 = 14.150_991_010_463_53;
