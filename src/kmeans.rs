use crate::algorithm::{assign_labels, fit, KMeansResult};
use crate::config::{Init, KMeansConfig};
use crate::error::KMeansError;
use crate::init::{first_k, kmeans_plus_plus, random_init, Seeding};
use ndarray::{Array1, Array2, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// K-means estimator with a scikit-learn style API.
///
/// Picks initial centroids according to [`KMeansConfig::init`], then refines
/// them with Lloyd's algorithm.
///
/// # Example
///
/// ```
/// use kmeanspp_rs::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_seed(7));
/// let labels = kmeans.fit_predict(&data.view()).unwrap();
///
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features (dimensions), 0 until the first fit
    d: usize,

    /// Seeding used by the last fit
    seeding: Option<Seeding>,

    /// Result of the last fit (None if not yet fitted)
    result: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new KMeans instance with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            config,
            d: 0,
            seeding: None,
            result: None,
        }
    }

    /// Fit the model to the data.
    ///
    /// The random generator is re-seeded from `config.seed` on every call, so
    /// repeated fits on the same data give the same centroids.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Number of samples is less than k
    /// - Data dimensions don't match a previous fit
    /// - K-means++ seeding is degenerate (all points identical)
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self, KMeansError> {
        let n_features = data.ncols();

        if self.d == 0 {
            self.d = n_features;
        } else if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let seeding = match self.config.init {
            Init::PlusPlus => kmeans_plus_plus(data, self.config.k, &mut rng)?,
            Init::First => first_k(data, self.config.k)?,
            Init::Random => random_init(data, self.config.k, &mut rng)?,
        };

        let result = fit(
            data,
            &seeding.centroids.view(),
            self.config.max_iters,
            self.config.tol,
        )?;

        self.seeding = Some(seeding);
        self.result = Some(result);
        Ok(self)
    }

    /// Predict cluster assignments for new data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let centroids = self.centroids().ok_or(KMeansError::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(KMeansError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        Ok(assign_labels(data, &centroids.view()))
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.fit(data)?;
        self.predict(data)
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.result.as_ref().map(|r| &r.centroids)
    }

    /// Row indices of the initial centroids chosen by the last fit.
    pub fn initial_indices(&self) -> Option<&[usize]> {
        self.seeding.as_ref().map(|s| s.indices.as_slice())
    }

    /// Full result of the last fit.
    pub fn result(&self) -> Option<&KMeansResult> {
        self.result.as_ref()
    }

    /// Within-cluster sum of squares of the last fit.
    pub fn inertia(&self) -> Option<f64> {
        self.result.as_ref().map(|r| r.inertia)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the number of features (dimensions).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
