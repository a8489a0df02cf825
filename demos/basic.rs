//! Basic example demonstrating kmeanspp-rs usage
//!
//! Run with: cargo run --example basic --release

use kmeanspp_rs::io::{format_centroids, format_indices};
use kmeanspp_rs::{KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("=== kmeanspp-rs example ===\n");

    // Generate synthetic data: 3 clusters in 2D for easy visualization
    let n_samples = 300;
    let n_features = 2;
    let n_clusters = 3;

    println!("Generating {} samples with {} features...", n_samples, n_features);

    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];
    let noise = Array2::random((n_samples, n_features), Uniform::new(-1.0, 1.0));
    let mut data = Array2::<f64>::zeros((n_samples, n_features));

    for i in 0..n_samples {
        let cluster_idx = i % 3;
        data[[i, 0]] = centers[cluster_idx][0] + noise[[i, 0]];
        data[[i, 1]] = centers[cluster_idx][1] + noise[[i, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let config = KMeansConfig::new(n_clusters)
        .with_max_iters(100)
        .with_tol(1e-6)
        .with_seed(42);

    println!("Running k-means++ with k={}...\n", n_clusters);

    let mut kmeans = KMeans::with_config(config);
    if let Err(err) = kmeans.fit(&data.view()) {
        eprintln!("Training failed: {}", err);
        std::process::exit(1);
    }

    if let Some(indices) = kmeans.initial_indices() {
        println!("Initial centroid rows: {}", format_indices(indices));
    }
    if let Some(centroids) = kmeans.centroids() {
        println!("Learned centroids:\n{}", format_centroids(&centroids.view()));
    }
    println!();

    let labels = match kmeans.predict(&data.view()) {
        Ok(labels) => labels,
        Err(err) => {
            eprintln!("Prediction failed: {}", err);
            std::process::exit(1);
        }
    };

    let mut cluster_counts = vec![0usize; n_clusters];
    for &label in labels.iter() {
        cluster_counts[label] += 1;
    }

    println!("Cluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }

    if let Some(inertia) = kmeans.inertia() {
        println!("\nInertia: {:.4}", inertia);
    }

    println!("\n=== Done! ===");
}
