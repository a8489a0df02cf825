//! Elbow method for choosing k.
//!
//! [`inertia_curve`] fits one model per k in `1..=max_k` and records the
//! final within-cluster sum of squares. [`detect_elbow`] picks the point of
//! that curve farthest from the straight line joining its two ends.

use crate::algorithm::fit;
use crate::error::KMeansError;
use crate::init::kmeans_plus_plus;
use log::debug;
use ndarray::ArrayView2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Inertia of the fitted model for each k
#[derive(Debug, Clone, PartialEq)]
pub struct InertiaCurve {
    pub ks: Vec<usize>,
    pub inertias: Vec<f64>,
}

/// Fit K-means++ / Lloyd for every k in `1..=max_k` (capped at the number of
/// points) and collect the inertias.
///
/// The runs are independent and execute on the rayon thread pool. Each run
/// seeds its own generator from `seed` and k, so the curve does not depend on
/// scheduling. A k larger than the number of distinct points records an
/// inertia of 0.
pub fn inertia_curve(
    data: &ArrayView2<f64>,
    max_k: usize,
    max_iter: usize,
    eps: f64,
    seed: u64,
) -> Result<InertiaCurve, KMeansError> {
    let max_k = max_k.min(data.nrows());
    if max_k == 0 {
        return Err(KMeansError::InsufficientData(
            "elbow sweep needs at least one point and max_k > 0".to_string(),
        ));
    }

    let ks: Vec<usize> = (1..=max_k).collect();
    let inertias = ks
        .par_iter()
        .map(|&k| -> Result<f64, KMeansError> {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(k as u64));
            let seeding = match kmeans_plus_plus(data, k, &mut rng) {
                Ok(seeding) => seeding,
                // Fewer than k distinct points: every point already sits on a
                // chosen centroid.
                Err(KMeansError::DegenerateSeeding { chosen, .. }) => {
                    debug!("elbow: k = {} exceeds {} distinct points, inertia = 0", k, chosen);
                    return Ok(0.0);
                }
                Err(e) => return Err(e),
            };
            let result = fit(data, &seeding.centroids.view(), max_iter, eps)?;
            debug!("elbow: k = {}, inertia = {:.6}", k, result.inertia);
            Ok(result.inertia)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InertiaCurve { ks, inertias })
}

/// Return the `(k, inertia)` point with the largest perpendicular distance to
/// the chord between the first and last points. Ties go to the smaller k.
/// Returns `None` for an empty curve.
pub fn detect_elbow(curve: &InertiaCurve) -> Option<(usize, f64)> {
    let n = curve.ks.len().min(curve.inertias.len());
    if n == 0 {
        return None;
    }

    let (x0, y0) = (curve.ks[0] as f64, curve.inertias[0]);
    let (x1, y1) = (curve.ks[n - 1] as f64, curve.inertias[n - 1]);
    let (dx, dy) = (x1 - x0, y1 - y0);
    let chord = (dx * dx + dy * dy).sqrt();
    if chord == 0.0 {
        return Some((curve.ks[0], curve.inertias[0]));
    }

    let mut best = 0;
    let mut best_dist = f64::NEG_INFINITY;
    for i in 0..n {
        let (px, py) = (curve.ks[i] as f64, curve.inertias[i]);
        let dist = (dx * (y0 - py) - dy * (x0 - px)).abs() / chord;
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }

    Some((curve.ks[best], curve.inertias[best]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_detect_elbow_on_known_curve() {
        let curve = InertiaCurve {
            ks: vec![1, 2, 3, 4, 5, 6],
            inertias: vec![100.0, 20.0, 10.0, 8.0, 6.0, 5.0],
        };

        assert_eq!(detect_elbow(&curve), Some((2, 20.0)));
    }

    #[test]
    fn test_detect_elbow_straight_line_picks_first() {
        let curve = InertiaCurve {
            ks: vec![1, 2, 3],
            inertias: vec![30.0, 20.0, 10.0],
        };

        // Every point lies on the chord
        assert_eq!(detect_elbow(&curve).map(|(k, _)| k), Some(1));
    }

    #[test]
    fn test_detect_elbow_empty() {
        let curve = InertiaCurve {
            ks: vec![],
            inertias: vec![],
        };
        assert_eq!(detect_elbow(&curve), None);
    }

    #[test]
    fn test_inertia_curve_three_blobs() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let centers = [[-10.0, -10.0], [0.0, 10.0], [10.0, -10.0]];
        let noise = Array2::random_using((300, 2), Uniform::new(-0.5, 0.5), &mut rng);
        let mut data = Array2::zeros((300, 2));
        for i in 0..300 {
            data[[i, 0]] = centers[i % 3][0] + noise[[i, 0]];
            data[[i, 1]] = centers[i % 3][1] + noise[[i, 1]];
        }

        let curve = inertia_curve(&data.view(), 8, 300, 1e-4, 1234).unwrap();
        assert_eq!(curve.ks, (1..=8).collect::<Vec<_>>());
        assert_eq!(curve.inertias.len(), 8);

        let (elbow_k, _) = detect_elbow(&curve).unwrap();
        assert_eq!(elbow_k, 3);
    }

    #[test]
    fn test_inertia_curve_is_reproducible() {
        let data = Array2::random_using(
            (60, 3),
            Uniform::new(-1.0, 1.0),
            &mut ChaCha8Rng::seed_from_u64(1),
        );

        let a = inertia_curve(&data.view(), 5, 100, 1e-6, 77).unwrap();
        let b = inertia_curve(&data.view(), 5, 100, 1e-6, 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_inertia_curve_caps_max_k() {
        let data = Array2::random_using(
            (4, 2),
            Uniform::new(-1.0, 1.0),
            &mut ChaCha8Rng::seed_from_u64(2),
        );

        let curve = inertia_curve(&data.view(), 10, 50, 1e-6, 0).unwrap();
        assert_eq!(curve.ks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_inertia_curve_with_few_distinct_points() {
        // 20 rows on only 3 distinct locations
        let locations = [[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]];
        let mut data = Array2::zeros((20, 2));
        for i in 0..20 {
            data[[i, 0]] = locations[i % 3][0];
            data[[i, 1]] = locations[i % 3][1];
        }

        let curve = inertia_curve(&data.view(), 5, 100, 1e-6, 0).unwrap();
        assert_eq!(curve.ks, vec![1, 2, 3, 4, 5]);
        assert!(curve.inertias[0] > 0.0);
        assert_eq!(&curve.inertias[2..], &[0.0, 0.0, 0.0]);
    }
}
