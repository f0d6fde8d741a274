use crate::algorithm::lloyd;
use crate::assignment::nearest_centroid;
use crate::config::KMeansConfig;
use crate::error::KMeansError;
use crate::observer::{IterationObserver, NoopObserver};
use crate::point::{points_from_array, points_to_array, Point};
use ndarray::{Array1, Array2, ArrayView2};
use rayon::prelude::*;

/// Lloyd's k-means over 2-D points, with an ndarray-facing API.
///
/// Input data is an `(n_samples, 2)` array. Initial centroids are the first
/// `k` rows, so the result depends on row order but never on randomness or on
/// the configured worker count.
///
/// # Example
///
/// ```
/// use lloyd2d::Lloyd2D;
/// use ndarray::array;
///
/// let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
///
/// let mut kmeans = Lloyd2D::new(2);
/// kmeans.train(&data.view()).unwrap();
///
/// let labels = kmeans.predict(&data.view()).unwrap();
/// assert_eq!(labels.to_vec(), vec![0, 1, 0, 1]);
/// ```
pub struct Lloyd2D {
    /// Model configuration
    config: KMeansConfig,

    /// Trained centroids (None if not yet fitted)
    centroids: Option<Vec<Point>>,

    /// Iterations used by the last training run
    n_iterations: usize,
}

impl Lloyd2D {
    /// Create a new instance with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new instance with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn with_config(config: KMeansConfig) -> Self {
        assert!(config.k > 0, "k must be greater than 0");

        Self {
            config,
            centroids: None,
            n_iterations: 0,
        }
    }

    /// Train the model on the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Data does not have exactly 2 columns
    /// - Number of samples is less than k
    /// - A cluster empties out under [`crate::EmptyClusterPolicy::Fail`]
    pub fn train(&mut self, data: &ArrayView2<f64>) -> Result<(), KMeansError> {
        self.train_observed(data, &mut NoopObserver)
    }

    /// Train the model, reporting every iteration to `observer`.
    pub fn train_observed<O>(
        &mut self,
        data: &ArrayView2<f64>,
        observer: &mut O,
    ) -> Result<(), KMeansError>
    where
        O: IterationObserver + ?Sized,
    {
        let points = points_from_array(data)?;
        let result = lloyd(points, &self.config, observer)?;

        self.centroids = Some(result.centroids);
        self.n_iterations = result.n_iterations;
        Ok(())
    }

    /// Fit the model to the data. Equivalent to `train()`.
    ///
    /// # Returns
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn fit(&mut self, data: &ArrayView2<f64>) -> Result<&mut Self, KMeansError> {
        self.train(data)?;
        Ok(self)
    }

    /// Predict cluster assignments for new data.
    ///
    /// Each row goes to its nearest trained centroid, ties to the lowest
    /// index.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data does not have exactly 2 columns
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        let centroids = self.centroids.as_ref().ok_or(KMeansError::NotFitted)?;
        let points = points_from_array(data)?;

        let labels: Vec<usize> = if self.config.workers > 1 {
            points
                .par_iter()
                .map(|p| nearest_centroid(p, centroids))
                .collect()
        } else {
            points.iter().map(|p| nearest_centroid(p, centroids)).collect()
        };

        Ok(Array1::from(labels))
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(&mut self, data: &ArrayView2<f64>) -> Result<Array1<usize>, KMeansError> {
        self.train(data)?;
        self.predict(data)
    }

    /// Get the trained centroids as a `(k, 2)` array, or `None` before training.
    pub fn centroids(&self) -> Option<Array2<f64>> {
        self.centroids.as_deref().map(points_to_array)
    }

    /// Get the trained centroids as points, or `None` before training.
    pub fn centroid_points(&self) -> Option<&[Point]> {
        self.centroids.as_deref()
    }

    /// Iterations used by the last training run (0 before training).
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
