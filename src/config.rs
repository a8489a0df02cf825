/// How the estimator picks its initial centroids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Init {
    /// K-means++ weighted sampling (squared distance to the nearest chosen centroid)
    #[default]
    PlusPlus,
    /// The first k points of the dataset, in order
    First,
    /// k distinct points sampled uniformly
    Random,
}

/// Configuration for the KMeans estimator
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of Lloyd iterations
    pub max_iters: usize,

    /// Convergence tolerance. The algorithm stops once the largest
    /// centroid shift of an iteration is strictly below this value.
    pub tol: f64,

    /// Random seed for centroid initialization
    pub seed: u64,

    /// Initialization strategy
    pub init: Init,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            max_iters: 300,
            tol: 1e-3,
            seed: 1234,
            init: Init::PlusPlus,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initialization strategy
    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }
}
