use crate::assignment::{assign_owners, assign_owners_parallel};
use crate::config::{check_point_count, EmptyClusterPolicy, KMeansConfig};
use crate::error::KMeansError;
use crate::init::{generate_points, seed_centroids};
use crate::observer::{IterationObserver, Snapshot};
use crate::point::{centroid_shift, Point};
use crate::update::{update_centroids, update_centroids_parallel};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::ThreadPool;
use std::time::{Duration, Instant};

/// Result of a Lloyd's k-means run
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// The clustered points
    pub points: Vec<Point>,
    /// Final centroid positions
    pub centroids: Vec<Point>,
    /// Owning centroid of every point
    pub owners: Vec<usize>,
    /// Number of assignment/update passes, including the final one that
    /// confirmed no owner changed
    pub n_iterations: usize,
    /// `false` only when `max_iters` stopped the run first
    pub converged: bool,
    /// Wall-clock time spent in the loop
    pub elapsed: Duration,
}

/// Generate points from the configuration and cluster them.
///
/// The point set is drawn from a `ChaCha8Rng` seeded with `config.seed`, and
/// the first `k` points become the initial centroids.
pub fn run<O>(config: &KMeansConfig, observer: &mut O) -> Result<KMeansResult, KMeansError>
where
    O: IterationObserver + ?Sized,
{
    config.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let points = generate_points(config.n_points, config.max_coordinate, &mut rng);

    info!(
        "Generated {} points in [0, {}) with seed {}",
        config.n_points, config.max_coordinate, config.seed
    );

    lloyd(points, config, observer)
}

/// Cluster the given points, seeding centroids with the first `k` of them.
///
/// `config.n_points` and `config.max_coordinate` are ignored.
pub fn lloyd<O>(
    points: Vec<Point>,
    config: &KMeansConfig,
    observer: &mut O,
) -> Result<KMeansResult, KMeansError>
where
    O: IterationObserver + ?Sized,
{
    config.validate_params()?;
    check_point_count(points.len(), config.k)?;

    let k = config.k;
    let pool = build_pool(config.workers)?;

    info!(
        "Running k-means: {} points, {} clusters, {} worker(s)",
        points.len(),
        k,
        config.workers
    );

    let mut centroids = seed_centroids(&points, k);
    let mut owners = vec![0usize; points.len()];

    observer.on_start(&Snapshot {
        iteration: 0,
        changed: false,
        points: &points,
        centroids: &centroids,
        owners: &owners,
    });

    let start = Instant::now();
    let mut n_iterations = 0;
    let mut converged = false;

    loop {
        if config.max_iters.is_some_and(|max| n_iterations >= max) {
            warn!(
                "Stopped after {} iterations without converging",
                n_iterations
            );
            break;
        }

        let iter_start = Instant::now();
        let prev_centroids = centroids.clone();

        let (changed, empty_clusters) = match &pool {
            Some(pool) => pool.install(|| {
                let changed = assign_owners_parallel(&points, &centroids, &mut owners);
                let empty = update_centroids_parallel(&points, &owners, &mut centroids);
                (changed, empty)
            }),
            None => {
                let changed = assign_owners(&points, &centroids, &mut owners);
                let empty = update_centroids(&points, &owners, &mut centroids);
                (changed, empty)
            }
        };

        n_iterations += 1;

        if let Some(&cluster) = empty_clusters.first() {
            match config.empty_cluster {
                EmptyClusterPolicy::Fail => {
                    return Err(KMeansError::EmptyCluster {
                        cluster,
                        iteration: n_iterations,
                    });
                }
                EmptyClusterPolicy::KeepPrevious => {
                    warn!(
                        "Iteration {}: {} empty cluster(s) kept in place: {:?}",
                        n_iterations,
                        empty_clusters.len(),
                        empty_clusters
                    );
                }
            }
        }

        debug!(
            "Iteration {}: changed = {}, shift = {:.6}, time = {:.4}s",
            n_iterations,
            changed,
            centroid_shift(&prev_centroids, &centroids),
            iter_start.elapsed().as_secs_f64()
        );

        observer.on_iteration(&Snapshot {
            iteration: n_iterations,
            changed,
            points: &points,
            centroids: &centroids,
            owners: &owners,
        });

        if !changed {
            converged = true;
            break;
        }
    }

    let elapsed = start.elapsed();

    if converged {
        info!(
            "Converged after {} iterations in {:.4}s",
            n_iterations,
            elapsed.as_secs_f64()
        );
    }

    Ok(KMeansResult {
        points,
        centroids,
        owners,
        n_iterations,
        converged,
        elapsed,
    })
}

/// A dedicated pool of exactly `workers` threads, or `None` to stay serial
fn build_pool(workers: usize) -> Result<Option<ThreadPool>, KMeansError> {
    if workers <= 1 {
        return Ok(None);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lloyd2d-worker-{}", i))
        .build()?;

    Ok(Some(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use approx::assert_relative_eq;

    fn square_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 1.0),
        ]
    }

    #[test]
    fn test_first_k_seeding_on_two_columns() {
        // Seeds (0,0) and (0,1) split the points by row, not by column:
        // (10,0) is nearer (0,0) and (10,1) is nearer (0,1).
        let config = KMeansConfig::new(2);
        let result = lloyd(square_points(), &config, &mut NoopObserver).unwrap();

        assert!(result.converged);
        assert_eq!(result.n_iterations, 2);
        assert_eq!(result.owners, vec![0, 1, 0, 1]);
        assert_relative_eq!(result.centroids[0].x, 5.0);
        assert_relative_eq!(result.centroids[0].y, 0.0);
        assert_relative_eq!(result.centroids[1].x, 5.0);
        assert_relative_eq!(result.centroids[1].y, 1.0);
    }

    #[test]
    fn test_k_equals_one_single_iteration() {
        let config = KMeansConfig::new(1);
        let result = lloyd(square_points(), &config, &mut NoopObserver).unwrap();

        assert_eq!(result.n_iterations, 1);
        assert_eq!(result.owners, vec![0; 4]);
        assert_relative_eq!(result.centroids[0].x, 5.0);
        assert_relative_eq!(result.centroids[0].y, 0.5);
    }

    #[test]
    fn test_points_equal_k() {
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(5.0, 2.0),
            Point::new(3.0, 8.0),
        ];
        let config = KMeansConfig::new(3);
        let result = lloyd(points.clone(), &config, &mut NoopObserver).unwrap();

        assert!(result.converged);
        // The zeroed ownership mapping changes once, then the seeds hold.
        assert_eq!(result.n_iterations, 2);
        assert_eq!(result.owners, vec![0, 1, 2]);
        assert_eq!(result.centroids, points);
    }

    #[test]
    fn test_max_iters_stops_early() {
        let config = KMeansConfig::new(2).with_max_iters(Some(1));
        let result = lloyd(square_points(), &config, &mut NoopObserver).unwrap();

        assert!(!result.converged);
        assert_eq!(result.n_iterations, 1);
    }

    #[test]
    fn test_empty_cluster_policies() {
        // Duplicate leading points give two identical seeds; the second
        // never wins a tie and stays empty.
        let points = vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(4.0, 4.0),
        ];

        let keep = KMeansConfig::new(2);
        let result = lloyd(points.clone(), &keep, &mut NoopObserver).unwrap();
        assert!(result.converged);
        assert_eq!(result.owners, vec![0, 0, 0]);
        assert_eq!(result.centroids[1], Point::new(1.0, 1.0));

        let fail = KMeansConfig::new(2).with_empty_cluster(EmptyClusterPolicy::Fail);
        let err = lloyd(points, &fail, &mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            KMeansError::EmptyCluster {
                cluster: 1,
                iteration: 1
            }
        ));
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let config = KMeansConfig::new(2);
        let mut seen = Vec::new();
        let mut observer = |s: &Snapshot<'_>| {
            assert_eq!(s.points.len(), 4);
            assert_eq!(s.centroids.len(), 2);
            assert!(s.owners.iter().all(|&o| o < 2));
            seen.push((s.iteration, s.changed));
        };

        let result = lloyd(square_points(), &config, &mut observer).unwrap();

        assert_eq!(seen, vec![(1, true), (2, false)]);
        assert_eq!(seen.len(), result.n_iterations);
    }

    #[test]
    fn test_rejects_insufficient_points() {
        let config = KMeansConfig::new(5);
        let result = lloyd(square_points(), &config, &mut NoopObserver);
        assert!(matches!(result, Err(KMeansError::InsufficientData(_))));
    }

    #[test]
    fn test_run_generates_configured_points() {
        let config = KMeansConfig::new(4).with_n_points(300).with_seed(5);
        let result = run(&config, &mut NoopObserver).unwrap();

        assert_eq!(result.points.len(), 300);
        assert_eq!(result.owners.len(), 300);
        assert_eq!(result.centroids.len(), 4);
        assert!(result.converged);
    }
}
