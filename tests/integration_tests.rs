use kmeanspp_rs::algorithm::{assign_labels, inertia, lloyd_step, update_centroids};
use kmeanspp_rs::init::first_k;
use kmeanspp_rs::io::{format_centroids, format_indices};
use kmeanspp_rs::{fit, kmeans_plus_plus, Init, KMeans, KMeansConfig, KMeansError};
use ndarray::{array, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generate synthetic clustered data with known centers
fn generate_clustered_data(
    n_samples: usize,
    n_features: usize,
    n_clusters: usize,
    seed: u64,
) -> (Array2<f64>, Array2<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Centers on a coarse grid so that clusters never overlap
    let mut centers = Array2::zeros((n_clusters, n_features));
    for (cluster_idx, mut center) in centers.outer_iter_mut().enumerate() {
        let offset = cluster_idx as f64 * 3.0;
        for j in 0..n_features {
            let corner = if (cluster_idx >> (j % 8)) & 1 == 1 { 20.0 } else { -20.0 };
            center[j] = corner + offset;
        }
    }

    let noise = Array2::random_using((n_samples, n_features), Uniform::new(-0.5, 0.5), &mut rng);
    let mut data = Array2::zeros((n_samples, n_features));
    for i in 0..n_samples {
        let center = centers.row(i % n_clusters);
        for j in 0..n_features {
            data[[i, j]] = center[j] + noise[[i, j]];
        }
    }

    (data, centers)
}

// ============================================================================
// End-to-end examples
// ============================================================================

#[test]
fn test_two_pairs_from_first_two_points() {
    let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
    let init = first_k(&data.view(), 2).unwrap();

    let result = fit(&data.view(), &init.centroids.view(), 10, 0.001).unwrap();

    assert_eq!(
        format_centroids(&result.centroids.view()),
        "0.0000,0.5000\n10.0000,10.5000"
    );
}

#[test]
fn test_two_pairs_from_separated_seeds() {
    let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
    let init = array![[0.0, 0.0], [10.0, 10.0]];

    let result = fit(&data.view(), &init.view(), 10, 0.001).unwrap();

    assert_eq!(
        format_centroids(&result.centroids.view()),
        "0.0000,0.5000\n10.0000,10.5000"
    );
}

#[test]
fn test_plus_plus_then_fit_prints_indices_and_centroids() {
    let (data, _) = generate_clustered_data(120, 3, 4, 8);
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    let seeding = kmeans_plus_plus(&data.view(), 4, &mut rng).unwrap();
    let result = fit(&data.view(), &seeding.centroids.view(), 300, 0.0).unwrap();

    let indices_line = format_indices(&seeding.indices);
    assert_eq!(indices_line.split(',').count(), 4);

    let rendered = format_centroids(&result.centroids.view());
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in lines {
        let cells: Vec<&str> = line.split(',').collect();
        assert_eq!(cells.len(), 3);
        for cell in cells {
            let decimals = cell.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 4, "expected four decimals in {}", cell);
        }
    }
}

// ============================================================================
// Lloyd properties
// ============================================================================

#[test]
fn test_fit_terminates_within_max_iter() {
    let data = Array2::random_using(
        (400, 8),
        Uniform::new(-1.0, 1.0),
        &mut ChaCha8Rng::seed_from_u64(3),
    );
    let init = first_k(&data.view(), 10).unwrap();

    for max_iter in [1, 2, 5, 20] {
        let result = fit(&data.view(), &init.centroids.view(), max_iter, 0.0).unwrap();
        assert!(result.n_iterations <= max_iter);
        assert_eq!(result.centroids.dim(), (10, 8));
    }
}

#[test]
fn test_refit_from_own_output_is_fixed_point() {
    let (data, _) = generate_clustered_data(500, 6, 5, 42);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let seeding = kmeans_plus_plus(&data.view(), 5, &mut rng).unwrap();

    let first = fit(&data.view(), &seeding.centroids.view(), 300, 1e-9).unwrap();
    assert!(first.converged);

    let second = fit(&data.view(), &first.centroids.view(), 300, 1e-9).unwrap();
    assert!(second.converged);
    assert_eq!(second.n_iterations, 1);
    assert_eq!(first.centroids, second.centroids);
}

#[test]
fn test_inertia_non_increasing_on_clustered_data() {
    let (data, _) = generate_clustered_data(600, 4, 6, 17);
    // Seeds all taken from the same cluster to force several iterations
    let mut centroids = data.select(Axis(0), &[0, 6, 12, 18, 24, 30]);

    let mut prev = f64::INFINITY;
    for _ in 0..30 {
        let labels = assign_labels(&data.view(), &centroids.view());
        let current = inertia(&data.view(), &centroids.view(), &labels.view());
        assert!(current <= prev + 1e-9, "inertia increased: {} -> {}", prev, current);
        prev = current;
        centroids = lloyd_step(&data.view(), &centroids.view()).0;
    }
}

#[test]
fn test_empty_cluster_centroid_unchanged() {
    let data = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
    let centroids = array![[0.0, 0.0], [1000.0, 1000.0], [0.5, 0.5]];

    let labels = assign_labels(&data.view(), &centroids.view());
    assert!(labels.iter().all(|&l| l != 1));

    let (updated, empty) = update_centroids(&data.view(), &labels.view(), &centroids.view());
    assert_eq!(empty, vec![1]);
    assert_eq!(updated.row(1), centroids.row(1));
}

#[test]
fn test_equidistant_point_goes_to_first_centroid() {
    let data = array![[0.0, 0.0]];
    let centroids = array![[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0]];

    let labels = assign_labels(&data.view(), &centroids.view());
    assert_eq!(labels[0], 0);
}

// ============================================================================
// K-means++ seeding
// ============================================================================

#[test]
fn test_seeding_reproducible_with_seed() {
    let (data, _) = generate_clustered_data(300, 8, 5, 1);

    let a = kmeans_plus_plus(&data.view(), 5, &mut ChaCha8Rng::seed_from_u64(12345)).unwrap();
    let b = kmeans_plus_plus(&data.view(), 5, &mut ChaCha8Rng::seed_from_u64(12345)).unwrap();

    assert_eq!(a.indices, b.indices);
    assert_eq!(a.centroids, b.centroids);
}

#[test]
fn test_seeding_covers_separated_clusters() {
    let n_clusters = 4;
    let (data, _) = generate_clustered_data(400, 5, n_clusters, 21);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let seeding = kmeans_plus_plus(&data.view(), n_clusters, &mut rng).unwrap();

    // Rows are generated round-robin, so the cluster of row i is i % n_clusters
    let mut clusters: Vec<usize> = seeding.indices.iter().map(|i| i % n_clusters).collect();
    clusters.sort();
    assert_eq!(clusters, (0..n_clusters).collect::<Vec<_>>());
}

#[test]
fn test_seeding_single_repeated_point_is_reported() {
    let data = Array2::from_elem((5, 2), 3.0);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let result = kmeans_plus_plus(&data.view(), 2, &mut rng);
    match result {
        Err(KMeansError::DegenerateSeeding { chosen, k }) => {
            assert_eq!(chosen, 1);
            assert_eq!(k, 2);
        }
        other => panic!("expected DegenerateSeeding, got {:?}", other),
    }
}

// ============================================================================
// Estimator
// ============================================================================

#[test]
fn test_estimator_fit_predict_recovers_clusters() {
    let (data, _) = generate_clustered_data(300, 4, 3, 5);
    let mut kmeans = KMeans::with_config(KMeansConfig::new(3).with_seed(5));

    let labels = kmeans.fit_predict(&data.view()).unwrap();

    // Rows of the same generated cluster share a label
    for i in 3..labels.len() {
        assert_eq!(labels[i], labels[i % 3]);
    }
    assert_ne!(labels[0], labels[1]);
    assert_ne!(labels[1], labels[2]);
    assert_ne!(labels[0], labels[2]);
}

#[test]
fn test_estimator_same_seed_same_centroids() {
    let data = Array2::random((500, 32), Uniform::new(-1.0, 1.0));
    let config = KMeansConfig::new(5).with_max_iters(25).with_seed(12345);

    let mut kmeans1 = KMeans::with_config(config.clone());
    let mut kmeans2 = KMeans::with_config(config);

    kmeans1.fit(&data.view()).unwrap();
    kmeans2.fit(&data.view()).unwrap();

    assert_eq!(kmeans1.centroids().unwrap(), kmeans2.centroids().unwrap());
    assert_eq!(kmeans1.initial_indices(), kmeans2.initial_indices());
}

#[test]
fn test_estimator_init_strategies() {
    let (data, _) = generate_clustered_data(90, 2, 3, 2);

    for init in [Init::PlusPlus, Init::First, Init::Random] {
        let mut kmeans = KMeans::with_config(KMeansConfig::new(3).with_init(init));
        kmeans.fit(&data.view()).unwrap();
        assert_eq!(kmeans.centroids().unwrap().dim(), (3, 2));
        assert!(kmeans.inertia().unwrap() >= 0.0);
    }
}

#[test]
fn test_estimator_k_equals_one_gives_mean() {
    let data = Array2::random((100, 8), Uniform::new(-1.0, 1.0));
    let mut kmeans = KMeans::new(1);

    let labels = kmeans.fit_predict(&data.view()).unwrap();
    assert!(labels.iter().all(|&l| l == 0));

    let centroids = kmeans.centroids().unwrap();
    let mean = data.mean_axis(Axis(0)).unwrap();
    for j in 0..data.ncols() {
        assert!((centroids[[0, j]] - mean[j]).abs() < 1e-9);
    }
}

#[test]
fn test_estimator_insufficient_data() {
    let data = Array2::random((3, 4), Uniform::new(-1.0, 1.0));
    let mut kmeans = KMeans::new(5);

    let result = kmeans.fit(&data.view());
    assert!(matches!(result, Err(KMeansError::InsufficientData(_))));
}

#[test]
fn test_invalid_k_zero() {
    let result = std::panic::catch_unwind(|| KMeans::new(0));
    assert!(result.is_err(), "k=0 should panic");
}
