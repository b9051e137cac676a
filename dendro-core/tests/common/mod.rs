use dendro_core::{MetricError, euclidean};

/// Four tight groups of three points; the first two groups sit far from the
/// last two.
#[must_use]
pub fn grouped_points() -> Vec<Vec<f64>> {
    vec![
        vec![101.0, 102.0, 103.0],
        vec![102.0, 103.0, 104.0],
        vec![103.0, 104.0, 105.0],
        vec![111.0, 112.0, 113.0],
        vec![112.0, 113.0, 114.0],
        vec![113.0, 114.0, 115.0],
        vec![21.0, 22.0, 23.0],
        vec![22.0, 23.0, 24.0],
        vec![23.0, 24.0, 25.0],
        vec![29.0, 30.0, 31.0],
        vec![32.0, 33.0, 34.0],
        vec![33.0, 34.0, 35.0],
    ]
}

/// Euclidean distance scaled by `factor`, used to exercise closure metrics.
pub fn scaled_euclidean(factor: f64) -> impl Fn(&[f64], &[f64]) -> Result<f64, MetricError> {
    move |left: &[f64], right: &[f64]| euclidean(left, right).map(|distance| distance * factor)
}
