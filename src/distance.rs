use ndarray::{Array1, ArrayView1, ArrayView2};

/// Squared Euclidean distance between two vectors of equal length
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance between two vectors of equal length
#[inline]
pub fn euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Index of the centroid nearest to `point`, together with its distance.
///
/// Centroids are scanned in index order with a strict `<` against the running
/// best, so the lowest index wins ties.
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = euclidean(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    (best_label, best_dist)
}

/// Find the nearest centroid for every row of `data`
///
/// # Arguments
/// * `data` - Data points (n_samples, n_features)
/// * `centroids` - Centroids (k, n_features)
///
/// # Returns
/// * `labels` - Cluster assignments for each data point (n_samples,)
pub fn find_nearest_centroids(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
) -> Array1<usize> {
    data.outer_iter()
        .map(|point| nearest_centroid(&point, centroids).0)
        .collect()
}

/// Compute the centroid shift: the largest Euclidean movement of any single
/// centroid between two centroid sets of equal shape
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f64>,
    new_centroids: &ArrayView2<f64>,
) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| euclidean(&old_c, &new_c))
        .fold(0.0, f64::max)
}
