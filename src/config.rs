use crate::error::KMeansError;

/// What to do with a centroid that owns no points after an assignment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Leave the centroid where it was and log a warning
    #[default]
    KeepPrevious,

    /// Abort the run with [`KMeansError::EmptyCluster`]
    Fail,
}

/// Configuration for a Lloyd's k-means run
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Number of points to generate for [`crate::run`]
    pub n_points: usize,

    /// Generated coordinates are drawn uniformly from `[0, max_coordinate)`
    pub max_coordinate: f64,

    /// Random seed for point generation
    pub seed: u64,

    /// Number of worker threads for the assignment and update steps.
    /// With a single worker both steps run serially on the calling thread.
    pub workers: usize,

    /// Optional cap on the number of iterations. `None` runs until the
    /// ownership mapping stops changing.
    pub max_iters: Option<usize>,

    /// Handling of centroids that end up owning no points
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 8,
            n_points: 1_000,
            max_coordinate: 100.0,
            seed: 10_100,
            workers: 1,
            max_iters: None,
            empty_cluster: EmptyClusterPolicy::KeepPrevious,
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

    /// Set the number of generated points
    pub fn with_n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Set the exclusive upper bound for generated coordinates
    pub fn with_max_coordinate(mut self, max_coordinate: f64) -> Self {
        self.max_coordinate = max_coordinate;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of worker threads
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the iteration cap
    pub fn with_max_iters(mut self, max_iters: Option<usize>) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the empty cluster policy
    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Check everything that does not depend on the input points.
    pub(crate) fn validate_params(&self) -> Result<(), KMeansError> {
        if self.k == 0 {
            return Err(KMeansError::InvalidK(
                "k must be greater than 0".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(KMeansError::InvalidConfig(
                "workers must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the configuration of a generated run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` is 0
    /// - `n_points` is 0 or smaller than `k`
    /// - `workers` is 0
    /// - `max_coordinate` is not a positive finite number
    pub fn validate(&self) -> Result<(), KMeansError> {
        self.validate_params()?;
        check_point_count(self.n_points, self.k)?;

        if !self.max_coordinate.is_finite() || self.max_coordinate <= 0.0 {
            return Err(KMeansError::InvalidConfig(format!(
                "max_coordinate must be a positive finite number, got {}",
                self.max_coordinate
            )));
        }

        Ok(())
    }
}

pub(crate) fn check_point_count(n_points: usize, k: usize) -> Result<(), KMeansError> {
    if n_points == 0 {
        return Err(KMeansError::InsufficientData(
            "at least one point is required".to_string(),
        ));
    }

    if n_points < k {
        return Err(KMeansError::InsufficientData(format!(
            "Number of points ({}) is less than k ({})",
            n_points, k
        )));
    }

    Ok(())
}
