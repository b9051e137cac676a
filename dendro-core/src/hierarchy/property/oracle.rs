//! Definitional average-linkage oracle.
//!
//! Keeps explicit member lists and, at every step, recomputes the mean
//! pairwise dissimilarity between every pair of clusters from the original
//! matrix. This is `O(m³)` overall and shares no code with the engine.

/// One merge performed by the oracle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct OracleMerge {
    /// Mean pairwise dissimilarity between the merged clusters.
    pub distance: f64,
    /// Number of points in the merged cluster.
    pub size: usize,
}

/// Agglomerates `rows` by exhaustive search, returning merges in order.
pub(super) fn naive_average_linkage(rows: &[Vec<f64>]) -> Vec<OracleMerge> {
    let mut clusters: Vec<Vec<usize>> = (0..rows.len()).map(|point| vec![point]).collect();
    let mut merges = Vec::with_capacity(rows.len().saturating_sub(1));

    while clusters.len() > 1 {
        let mut best: Option<(usize, usize, f64)> = None;
        for left in 0..clusters.len() {
            for right in (left + 1)..clusters.len() {
                let distance = mean_pairwise(rows, &clusters[left], &clusters[right]);
                if best.is_none_or(|(_, _, incumbent)| distance < incumbent) {
                    best = Some((left, right, distance));
                }
            }
        }
        let Some((left, right, distance)) = best else {
            break;
        };
        let absorbed = clusters.swap_remove(right);
        clusters[left].extend(absorbed);
        merges.push(OracleMerge {
            distance,
            size: clusters[left].len(),
        });
    }
    merges
}

/// Mean of `rows[a][b]` over every `a` in `left` and `b` in `right`.
pub(super) fn mean_pairwise(rows: &[Vec<f64>], left: &[usize], right: &[usize]) -> f64 {
    let total: f64 = left
        .iter()
        .flat_map(|&a| right.iter().map(move |&b| rows[a][b]))
        .sum();
    total / (left.len() * right.len()) as f64
}
