use crate::distance::{compute_centroid_shift, find_nearest_centroids, squared_euclidean};
use crate::error::KMeansError;
use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use std::time::Instant;

/// Result of the Lloyd iteration
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Final centroids, in cluster index order
    pub centroids: Array2<f64>,
    /// Nearest-centroid label of every point under the final centroids
    pub labels: Array1<usize>,
    /// Number of iterations actually run
    pub n_iterations: usize,
    /// Whether the loop stopped because the largest shift fell below `eps`
    pub converged: bool,
    /// Within-cluster sum of squared distances under the final centroids
    pub inertia: f64,
}

/// Assignment step: label every point with the index of its nearest centroid.
/// Ties go to the lowest centroid index.
pub fn assign_labels(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> Array1<usize> {
    find_nearest_centroids(data, centroids)
}

/// Update step: replace each centroid with the mean of the points assigned to it.
///
/// A cluster that received no points keeps its previous centroid. Returns the
/// new centroids and the indices of the clusters that were empty.
pub fn update_centroids(
    data: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
    prev_centroids: &ArrayView2<f64>,
) -> (Array2<f64>, Vec<usize>) {
    let k = prev_centroids.nrows();
    let n_features = prev_centroids.ncols();

    let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
    let mut cluster_counts = vec![0usize; k];

    for (point, &label) in data.outer_iter().zip(labels.iter()) {
        cluster_counts[label] += 1;
        let mut sum = cluster_sums.row_mut(label);
        sum += &point;
    }

    let mut centroids = prev_centroids.to_owned();
    let mut empty_clusters = Vec::new();

    for (cluster_idx, &count) in cluster_counts.iter().enumerate() {
        if count > 0 {
            let mean = &cluster_sums.row(cluster_idx) / count as f64;
            centroids.row_mut(cluster_idx).assign(&mean);
        } else {
            empty_clusters.push(cluster_idx);
        }
    }

    (centroids, empty_clusters)
}

/// Within-cluster sum of squared distances for the given labelling
pub fn inertia(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
    labels: &ArrayView1<usize>,
) -> f64 {
    data.outer_iter()
        .zip(labels.iter())
        .map(|(point, &label)| squared_euclidean(&point, &centroids.row(label)))
        .sum()
}

/// One full Lloyd iteration: assign, then update.
/// Returns the updated centroids and the labels used to compute them.
pub fn lloyd_step(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
) -> (Array2<f64>, Array1<usize>) {
    let labels = assign_labels(data, centroids);
    let (new_centroids, _) = update_centroids(data, &labels.view(), centroids);
    (new_centroids, labels)
}

fn check_shapes(
    data: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
) -> Result<(), KMeansError> {
    if initial_centroids.nrows() == 0 {
        return Err(KMeansError::InvalidK(
            "at least one initial centroid is required".to_string(),
        ));
    }

    if data.nrows() == 0 {
        return Err(KMeansError::InsufficientData(
            "no data points to cluster".to_string(),
        ));
    }

    if data.ncols() != initial_centroids.ncols() {
        return Err(KMeansError::InvalidDimensions(format!(
            "points have {} features, centroids have {}",
            data.ncols(),
            initial_centroids.ncols()
        )));
    }

    Ok(())
}

/// Run Lloyd's algorithm from the given initial centroids.
///
/// Each iteration assigns every point to its nearest centroid, recomputes the
/// centroids as cluster means (empty clusters keep their centroid) and stops
/// as soon as the largest centroid shift is strictly below `eps`, returning the
/// freshly updated centroids. After `max_iter` iterations the last computed
/// centroid set is returned whether or not it converged.
///
/// No randomness is involved; the same inputs always give the same output.
pub fn fit(
    data: &ArrayView2<f64>,
    initial_centroids: &ArrayView2<f64>,
    max_iter: usize,
    eps: f64,
) -> Result<KMeansResult, KMeansError> {
    check_shapes(data, initial_centroids)?;

    let k = initial_centroids.nrows();
    debug!(
        "Lloyd: {} samples, {} features, {} clusters, max_iter = {}, eps = {}",
        data.nrows(),
        data.ncols(),
        k,
        max_iter,
        eps
    );

    let mut centroids = initial_centroids.to_owned();
    let mut n_iterations = 0;
    let mut converged = false;

    for iteration in 0..max_iter {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        let labels = assign_labels(data, &centroids.view());
        let (new_centroids, empty_clusters) =
            update_centroids(data, &labels.view(), &centroids.view());

        if !empty_clusters.is_empty() {
            warn!(
                "  Iteration {}: {} empty cluster(s) kept their centroid: {:?}",
                n_iterations,
                empty_clusters.len(),
                empty_clusters
            );
        }

        let shift = compute_centroid_shift(&centroids.view(), &new_centroids.view());
        centroids = new_centroids;

        debug!(
            "  Iteration {}/{}: shift = {:.6}, time = {:.4}s",
            n_iterations,
            max_iter,
            shift,
            iter_start.elapsed().as_secs_f64()
        );

        if shift < eps {
            converged = true;
            info!(
                "Converged after {} iterations (shift {:.6} < eps {:.6})",
                n_iterations, shift, eps
            );
            break;
        }
    }

    if !converged {
        info!("Stopped after reaching max_iter = {}", max_iter);
    }

    let labels = assign_labels(data, &centroids.view());
    let inertia = inertia(data, &centroids.view(), &labels.view());

    Ok(KMeansResult {
        centroids,
        labels,
        n_iterations,
        converged,
        inertia,
    })
}
