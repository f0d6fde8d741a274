use crate::point::Point;
use rayon::prelude::*;

/// Move every centroid to the mean of the points it owns (serial version)
///
/// Sums are accumulated in ascending point order, the same order the parallel
/// version uses, so both produce bit-identical centroids.
///
/// # Returns
/// Indices of centroids that own no point. Those centroids are left unchanged.
pub fn update_centroids(
    points: &[Point],
    owners: &[usize],
    centroids: &mut [Point],
) -> Vec<usize> {
    let k = centroids.len();
    let mut cluster_sums = vec![Point::default(); k];
    let mut cluster_counts = vec![0usize; k];

    for (point, &owner) in points.iter().zip(owners) {
        cluster_sums[owner] += *point;
        cluster_counts[owner] += 1;
    }

    let mut empty_clusters = Vec::new();
    for (cluster_idx, centroid) in centroids.iter_mut().enumerate() {
        match cluster_sums[cluster_idx].checked_div(cluster_counts[cluster_idx]) {
            Some(mean) => *centroid = mean,
            None => empty_clusters.push(cluster_idx),
        }
    }

    empty_clusters
}

/// Move every centroid to the mean of the points it owns, one rayon task per
/// centroid
///
/// Each task scans the shared points and owners read-only and writes only its
/// own centroid slot.
pub fn update_centroids_parallel(
    points: &[Point],
    owners: &[usize],
    centroids: &mut [Point],
) -> Vec<usize> {
    centroids
        .par_iter_mut()
        .enumerate()
        .filter_map(|(cluster_idx, centroid)| {
            let (sum, count) = points
                .iter()
                .zip(owners)
                .filter(|(_, &owner)| owner == cluster_idx)
                .fold((Point::default(), 0usize), |(sum, count), (point, _)| {
                    (sum + *point, count + 1)
                });

            match sum.checked_div(count) {
                Some(mean) => {
                    *centroid = mean;
                    None
                }
                None => Some(cluster_idx),
            }
        })
        .collect()
}
