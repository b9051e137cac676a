//! Point-set generators for the hierarchy property tests.
//!
//! Generation is driven by a seeded [`SmallRng`] so that every rstest case
//! and every shrunk proptest failure is reproducible from its seed alone.

use std::ops::Range;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::types::{HierarchyFixture, PointLayout};

const MIN_POINTS: usize = 2;
const MAX_POINTS: usize = 40;
const MAX_DIMENSIONS: usize = 4;
const BOUND: Range<f64> = -100.0..100.0;

/// Generates fixtures across all layouts.
pub(super) fn hierarchy_fixture_strategy() -> impl Strategy<Value = HierarchyFixture> {
    (any::<PointLayout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(layout, &mut rng)
    })
}

/// Generates a fixture for a specific layout.
pub(super) fn generate_fixture(layout: PointLayout, rng: &mut SmallRng) -> HierarchyFixture {
    let points = match layout {
        PointLayout::Uniform => generate_uniform(rng),
        PointLayout::Blobs => generate_blobs(rng),
        PointLayout::Line => generate_line(rng),
        PointLayout::Duplicates => generate_duplicates(rng),
    };
    HierarchyFixture { points, layout }
}

fn random_point(rng: &mut SmallRng, dimensions: usize, range: &Range<f64>) -> Vec<f64> {
    (0..dimensions).map(|_| rng.gen_range(range.clone())).collect()
}

fn generate_uniform(rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let count = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    let dimensions = rng.gen_range(1..=MAX_DIMENSIONS);
    (0..count)
        .map(|_| random_point(rng, dimensions, &BOUND))
        .collect()
}

fn generate_blobs(rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let count = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    let dimensions = rng.gen_range(1..=MAX_DIMENSIONS);
    let centres: Vec<Vec<f64>> = (0..rng.gen_range(2..=5))
        .map(|_| random_point(rng, dimensions, &BOUND))
        .collect();
    let jitter = 0.0..rng.gen_range(0.5..5.0);
    (0..count)
        .map(|_| {
            let centre = &centres[rng.gen_range(0..centres.len())];
            centre
                .iter()
                .map(|&value| value + rng.gen_range(jitter.clone()) - jitter.end / 2.0)
                .collect()
        })
        .collect()
}

fn generate_line(rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let count = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    (0..count).map(|_| random_point(rng, 1, &BOUND)).collect()
}

fn generate_duplicates(rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let mut points = generate_uniform(rng);
    let copies = rng.gen_range(1..=points.len());
    for _ in 0..copies {
        let source = points[rng.gen_range(0..points.len())].clone();
        points.push(source);
    }
    points.shuffle(rng);
    points
}
