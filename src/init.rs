//! Initial centroid selection.
//!
//! [`kmeans_plus_plus`] implements K-means++ seeding: the first centroid is a
//! uniform pick and every following one is drawn with probability
//! proportional to the squared distance to the nearest centroid chosen so far.
//! Each point keeps a single running minimum that is only compared against the
//! newest centroid, so a full seeding costs `O(n * k * d)`.

use crate::distance::squared_euclidean;
use crate::error::KMeansError;
use log::debug;
use ndarray::{s, Array2, ArrayView2, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Centroids picked from the data together with the rows they came from
#[derive(Debug, Clone)]
pub struct Seeding {
    /// Selected points, one per row, in selection order
    pub centroids: Array2<f64>,
    /// Row indices into the source data, in selection order
    pub indices: Vec<usize>,
}

fn check_k(n_samples: usize, k: usize) -> Result<(), KMeansError> {
    if k == 0 {
        return Err(KMeansError::InvalidK(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_samples < k {
        return Err(KMeansError::InsufficientData(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    Ok(())
}

/// Select `k` initial centroids with K-means++.
///
/// The random source is supplied by the caller; seeding the same generator the
/// same way reproduces the same selection.
///
/// # Errors
///
/// Returns [`KMeansError::DegenerateSeeding`] when the remaining probability
/// mass is zero (every point coincides with an already chosen centroid) or not
/// finite, and `InvalidK` / `InsufficientData` for `k == 0` or `n < k`.
pub fn kmeans_plus_plus<R: Rng>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Seeding, KMeansError> {
    let n_samples = data.nrows();
    check_k(n_samples, k)?;

    let first = rng.gen_range(0..n_samples);
    let mut indices = Vec::with_capacity(k);
    indices.push(first);

    let first_row = data.row(first);
    let mut min_distances: Vec<f64> = data
        .outer_iter()
        .map(|point| squared_euclidean(&point, &first_row))
        .collect();

    while indices.len() < k {
        let total: f64 = min_distances.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(KMeansError::DegenerateSeeding {
                chosen: indices.len(),
                k,
            });
        }

        let sampler =
            WeightedIndex::new(&min_distances).map_err(|_| KMeansError::DegenerateSeeding {
                chosen: indices.len(),
                k,
            })?;
        let next = sampler.sample(rng);
        debug!(
            "k-means++ pick {}/{}: index {} (weight {:.6} of {:.6})",
            indices.len() + 1,
            k,
            next,
            min_distances[next],
            total
        );
        indices.push(next);

        let chosen = data.row(next);
        for (min_dist, point) in min_distances.iter_mut().zip(data.outer_iter()) {
            let d = squared_euclidean(&point, &chosen);
            if d < *min_dist {
                *min_dist = d;
            }
        }
    }

    Ok(Seeding {
        centroids: data.select(Axis(0), &indices),
        indices,
    })
}

/// Use the first `k` rows of `data` as the initial centroids
pub fn first_k(data: &ArrayView2<f64>, k: usize) -> Result<Seeding, KMeansError> {
    check_k(data.nrows(), k)?;

    Ok(Seeding {
        centroids: data.slice(s![..k, ..]).to_owned(),
        indices: (0..k).collect(),
    })
}

/// Initialize centroids by selecting `k` distinct rows uniformly at random
pub fn random_init<R: Rng>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Result<Seeding, KMeansError> {
    let n_samples = data.nrows();
    check_k(n_samples, k)?;

    let all: Vec<usize> = (0..n_samples).collect();
    let indices: Vec<usize> = all.choose_multiple(rng, k).cloned().collect();

    Ok(Seeding {
        centroids: data.select(Axis(0), &indices),
        indices,
    })
}
