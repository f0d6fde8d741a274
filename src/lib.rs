//! # lloyd2d
//!
//! Lloyd's k-means clustering over 2-D points.
//!
//! ## Features
//!
//! - **Plain Lloyd iteration**: assign every point to its nearest centroid,
//!   move every centroid to the mean of its points, stop once no point
//!   changes owner
//! - **Parallel steps**: with `workers > 1` the assignment step runs one rayon
//!   task per point and the update step one task per centroid, on a dedicated
//!   pool. Results are bit-identical for any worker count
//! - **Deterministic**: points come from a seeded `ChaCha8Rng` and the first
//!   `k` points seed the centroids
//! - **Observable**: an [`IterationObserver`] sees the full state after every
//!   iteration; [`JsonLinesWriter`] persists it
//! - **ndarray compatible**: [`Lloyd2D`] offers `train()`, `fit()`, `predict()`
//!   over `(n, 2)` arrays
//!
//! ## Example
//!
//! ```rust
//! use lloyd2d::{run, KMeansConfig, NoopObserver};
//!
//! let config = KMeansConfig::new(5)
//!     .with_n_points(1_000)
//!     .with_seed(42)
//!     .with_workers(4);
//!
//! let result = run(&config, &mut NoopObserver).unwrap();
//! assert!(result.converged);
//! assert_eq!(result.centroids.len(), 5);
//! ```
//!
//! ## Watching iterations
//!
//! ```rust
//! use lloyd2d::{run, KMeansConfig, Snapshot};
//!
//! let config = KMeansConfig::new(3).with_n_points(200);
//! let mut changes = Vec::new();
//! let result = run(&config, &mut |s: &Snapshot<'_>| changes.push(s.changed)).unwrap();
//!
//! assert_eq!(changes.len(), result.n_iterations);
//! assert_eq!(changes.last(), Some(&false));
//! ```

mod algorithm;
mod assignment;
mod config;
mod error;
mod init;
mod kmeans;
mod observer;
mod point;
mod update;

pub use algorithm::{lloyd, run, KMeansResult};
pub use assignment::{assign_owners, assign_owners_parallel, nearest_centroid};
pub use config::{EmptyClusterPolicy, KMeansConfig};
pub use error::KMeansError;
pub use init::{generate_points, seed_centroids};
pub use kmeans::Lloyd2D;
pub use observer::{IterationObserver, JsonLinesWriter, NoopObserver, Snapshot};
pub use point::{centroid_shift, points_from_array, points_to_array, Point};
pub use update::{update_centroids, update_centroids_parallel};
