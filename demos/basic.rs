//! Basic example demonstrating lloyd2d usage
//!
//! Run with: cargo run --example basic --release

use lloyd2d::{Lloyd2D, KMeansConfig, Snapshot};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn main() {
    println!("=== lloyd2d example ===\n");

    // 3 noisy blobs
    let n_samples = 300;
    let n_clusters = 3;
    let centers = [[-5.0, -5.0], [0.0, 5.0], [5.0, -5.0]];

    let mut data = Array2::<f64>::zeros((n_samples, 2));
    for i in 0..n_samples {
        let cluster_idx = i % 3;
        let noise = Array2::random((1, 2), Uniform::new(-1.0, 1.0));
        data[[i, 0]] = centers[cluster_idx][0] + noise[[0, 0]];
        data[[i, 1]] = centers[cluster_idx][1] + noise[[0, 1]];
    }

    println!("True cluster centers:");
    for (i, center) in centers.iter().enumerate() {
        println!("  Cluster {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let config = KMeansConfig::new(n_clusters).with_workers(4);
    let mut kmeans = Lloyd2D::with_config(config);

    let mut report = |s: &Snapshot<'_>| {
        println!("  Iteration {}: changed = {}", s.iteration, s.changed);
    };
    kmeans
        .train_observed(&data.view(), &mut report)
        .expect("Training failed");

    println!("\nLearned centroids after {} iterations:", kmeans.n_iterations());
    let centroids = kmeans.centroids().unwrap();
    for i in 0..centroids.nrows() {
        println!(
            "  Centroid {}: ({:.4}, {:.4})",
            i,
            centroids[[i, 0]],
            centroids[[i, 1]]
        );
    }
    println!();

    let labels = kmeans.predict(&data.view()).expect("Prediction failed");

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

    println!("\n=== Done! ===");
}
