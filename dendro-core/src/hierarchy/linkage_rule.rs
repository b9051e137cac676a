//! Lance–Williams update rules applied when two clusters merge.

use core::fmt;

/// Rule recomputing the dissimilarity between a freshly merged cluster and
/// every other cluster.
///
/// Only average linkage (UPGMA) ships today; the enum is non-exhaustive so
/// further Lance–Williams rules can be added without breaking callers.
///
/// # Examples
/// ```
/// use dendro_core::LinkageRule;
///
/// // Merging a singleton at distance 2 with a pair at distance 5.
/// let updated = LinkageRule::Average.update(1, 2.0, 2, 5.0);
/// assert!((updated - 4.0).abs() < 1e-12);
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LinkageRule {
    /// Size-weighted mean of the two merged clusters' distances.
    #[default]
    Average,
}

impl LinkageRule {
    /// Distance from the union of clusters `a` and `b` to a third cluster `x`,
    /// given each cluster's size and its distance to `x`.
    ///
    /// The mean is formed by stepping from `distance_a` towards `distance_b`,
    /// so finite inputs near `f64::MAX` stay finite.
    #[must_use]
    pub fn update(self, size_a: usize, distance_a: f64, size_b: usize, distance_b: f64) -> f64 {
        match self {
            Self::Average => {
                let weight_b = size_b as f64 / (size_a as f64 + size_b as f64);
                distance_a + (distance_b - distance_a) * weight_b
            }
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Average => "average",
        }
    }
}

impl fmt::Display for LinkageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::equal_sizes(1, 2.0, 1, 6.0, 4.0)]
    #[case::pair_and_singleton(2, 9.5, 1, 8.0, 9.0)]
    #[case::equal_distances(3, 1.7e308, 5, 1.7e308, 1.7e308)]
    #[case::near_the_float_limit(1, 1.0e308, 1, 1.7e308, 1.35e308)]
    fn average_is_the_size_weighted_mean(
        #[case] size_a: usize,
        #[case] distance_a: f64,
        #[case] size_b: usize,
        #[case] distance_b: f64,
        #[case] expected: f64,
    ) {
        let updated = LinkageRule::Average.update(size_a, distance_a, size_b, distance_b);
        assert!(updated.is_finite());
        assert!((updated - expected).abs() <= expected * 1e-15);
    }
}
