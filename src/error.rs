use thiserror::Error;

/// Error types for the lloyd2d library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A run parameter other than k is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call train() or fit() first.")]
    NotFitted,

    /// Input data is not a set of 2-D points
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// A centroid owned no points and the run was configured to fail on it
    #[error("Cluster {cluster} owns no points after iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    /// The worker pool could not be created
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
