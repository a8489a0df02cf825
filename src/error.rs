use thiserror::Error;

/// Error types for the kmeanspp-rs library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid
    #[error("Invalid number of clusters: {0}")]
    InvalidK(String),

    /// The iteration cap is outside the accepted range
    #[error("Invalid maximum iteration: {0}")]
    InvalidMaxIter(String),

    /// The convergence tolerance is negative or not finite
    #[error("Invalid epsilon: {0}")]
    InvalidEps(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Dimension mismatch between points, centroids or model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// K-means++ ran out of probability mass before choosing k centroids.
    /// Happens when every remaining point coincides with a chosen centroid.
    #[error("Degenerate seeding: all distances are zero after choosing {chosen} of {k} centroids")]
    DegenerateSeeding { chosen: usize, k: usize },

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Input could not be parsed as numeric data
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to decode a `.npy` file
    #[error("Npy error: {0}")]
    Npy(String),

    /// Malformed comma-separated input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
