//! Numeric synthetic point generators for benchmarking.

mod generation;

use crate::source::SyntheticError;
use generation::{build_blob_centroids, validate_blob_config};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Uniform random vector configuration.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Configuration for Gaussian blob synthetic data.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// Number of Gaussian clusters.
    pub cluster_count: usize,
    /// Radius of the circle the centroids are placed on.
    pub separation: f64,
    /// Standard deviation of every axis around a centroid.
    pub spread: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Points generated eagerly from a seeded RNG, one `Vec<f64>` per point.
///
/// # Examples
///
/// ```
/// use dendro_benches::source::{SyntheticConfig, SyntheticPoints};
///
/// let config = SyntheticConfig { point_count: 10, dimensions: 4, seed: 42 };
/// let points = SyntheticPoints::generate(&config).expect("valid config");
/// assert_eq!(points.len(), 10);
/// assert_eq!(points.dimensions(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticPoints {
    points: Vec<Vec<f64>>,
    dimensions: usize,
    name: &'static str,
}

impl SyntheticPoints {
    /// Generates uniform random vectors in `[0.0, 1.0)`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        validate_basic_numeric_config(config.point_count, config.dimensions)?;
        checked_total(config.point_count, config.dimensions)?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let points = (0..config.point_count)
            .map(|_| {
                (0..config.dimensions)
                    .map(|_| rng.gen_range(0.0_f64..1.0_f64))
                    .collect()
            })
            .collect();

        Ok(Self {
            points,
            dimensions: config.dimensions,
            name: "synthetic-uniform",
        })
    }

    /// Generates Gaussian blobs around centroids spaced on a circle.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate_gaussian_blobs(config: &GaussianBlobConfig) -> Result<Self, SyntheticError> {
        let (points, _labels) = Self::generate_gaussian_blobs_with_labels(config)?;
        Ok(points)
    }

    /// Generates Gaussian blobs and returns deterministic ground-truth labels.
    ///
    /// Labels are assigned in round-robin centroid order, so point `i`
    /// belongs to blob `i % cluster_count`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian data generation requires floating-point arithmetic"
    )]
    pub fn generate_gaussian_blobs_with_labels(
        config: &GaussianBlobConfig,
    ) -> Result<(Self, Vec<usize>), SyntheticError> {
        validate_basic_numeric_config(config.point_count, config.dimensions)?;
        validate_blob_config(config)?;
        checked_total(config.point_count, config.dimensions)?;

        let centroids = build_blob_centroids(config, &mut SmallRng::seed_from_u64(config.seed));
        let mut rng = SmallRng::seed_from_u64(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5_u64);
        let mut points = Vec::with_capacity(config.point_count);
        let mut labels = Vec::with_capacity(config.point_count);
        for (label, centroid) in (0..config.cluster_count)
            .cycle()
            .zip(centroids.iter().cycle())
            .take(config.point_count)
        {
            labels.push(label);
            let point = centroid
                .iter()
                .map(|centre| {
                    generation::standard_normal_sample(&mut rng)
                        .map(|sample| *centre + sample * config.spread)
                })
                .collect::<Result<Vec<f64>, SyntheticError>>()?;
            points.push(point);
        }

        let generated = Self {
            points,
            dimensions: config.dimensions,
            name: "synthetic-gaussian-blobs",
        };
        Ok((generated, labels))
    }

    /// Returns the generated points.
    #[must_use]
    #[rustfmt::skip]
    pub fn points(&self) -> &[Vec<f64>] { &self.points }

    /// Consumes the generator output, yielding the points.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_points(self) -> Vec<Vec<f64>> { self.points }

    /// Returns the number of points.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.points.len() }

    /// Returns `true` when no points were generated.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Returns the dimensionality of each vector.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimensions(&self) -> usize { self.dimensions }

    /// Returns the generator family name.
    #[must_use]
    #[rustfmt::skip]
    pub const fn name(&self) -> &'static str { self.name }
}

const fn validate_basic_numeric_config(
    point_count: usize,
    dimensions: usize,
) -> Result<(), SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    Ok(())
}

fn checked_total(point_count: usize, dimensions: usize) -> Result<usize, SyntheticError> {
    point_count
        .checked_mul(dimensions)
        .ok_or(SyntheticError::Overflow)
}
