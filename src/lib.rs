//! # kmeanspp-rs
//!
//! K-means clustering with K-means++ seeding, built on ndarray.
//!
//! ## Features
//!
//! - **K-means++ seeding**: squared-distance weighted sampling with a running
//!   minimum per point and a caller-supplied random generator
//! - **Lloyd iteration**: lowest-index tie-breaking, empty clusters keep their
//!   centroid, stops when the largest centroid shift drops below `eps`
//! - **scikit-learn style estimator**: `fit()`, `predict()`, `fit_predict()`
//! - **Input/output helpers**: comma-separated text and `.npy` loading, keyed
//!   inner join, four-decimal output
//! - **Elbow sweep**: inertia for a range of k and elbow detection
//!
//! ## Example
//!
//! ```rust
//! use kmeanspp_rs::{fit, kmeans_plus_plus};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1234);
//! let seeding = kmeans_plus_plus(&data.view(), 2, &mut rng).unwrap();
//!
//! let result = fit(&data.view(), &seeding.centroids.view(), 300, 1e-3).unwrap();
//! assert_eq!(result.centroids.nrows(), 2);
//! ```
//!
//! ## Estimator
//!
//! ```rust
//! use kmeanspp_rs::io::format_centroids;
//! use kmeanspp_rs::{Init, KMeans, KMeansConfig};
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
//!
//! let config = KMeansConfig::new(2)
//!     .with_init(Init::First)
//!     .with_max_iters(10)
//!     .with_tol(0.001);
//!
//! let mut kmeans = KMeans::with_config(config);
//! kmeans.fit(&data.view()).unwrap();
//!
//! let centroids = kmeans.centroids().unwrap();
//! assert_eq!(
//!     format_centroids(&centroids.view()),
//!     "0.0000,0.5000\n10.0000,10.5000"
//! );
//! ```

pub mod algorithm;
mod config;
pub mod distance;
pub mod elbow;
mod error;
pub mod init;
pub mod io;
mod kmeans;
pub mod validate;

pub use algorithm::{fit, KMeansResult};
pub use config::{Init, KMeansConfig};
pub use error::KMeansError;
pub use init::{kmeans_plus_plus, Seeding};
pub use kmeans::KMeans;
