use crate::point::Point;
use rayon::prelude::*;

/// Index of the centroid closest to `point`.
///
/// Centroids are scanned in ascending order and only a strictly smaller
/// distance replaces the running best, so ties go to the lowest index.
#[inline]
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.iter().enumerate() {
        let dist = point.distance(centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    best_label
}

/// Reassign every point to its nearest centroid (serial version)
///
/// # Returns
/// `true` if at least one point changed owner
pub fn assign_owners(points: &[Point], centroids: &[Point], owners: &mut [usize]) -> bool {
    let mut changed = false;

    for (point, owner) in points.iter().zip(owners.iter_mut()) {
        let label = nearest_centroid(point, centroids);
        if label != *owner {
            *owner = label;
            changed = true;
        }
    }

    changed
}

/// Reassign every point to its nearest centroid, one rayon task per point
///
/// Runs on the current rayon pool; wrap the call in `ThreadPool::install` to
/// pick the worker count. Each task writes only its own owner slot and the
/// per-point results are OR-reduced into the return value.
pub fn assign_owners_parallel(
    points: &[Point],
    centroids: &[Point],
    owners: &mut [usize],
) -> bool {
    // `any` would short-circuit and leave the remaining owners stale.
    owners
        .par_iter_mut()
        .zip(points.par_iter())
        .map(|(owner, point)| {
            let label = nearest_centroid(point, centroids);
            let changed = label != *owner;
            *owner = label;
            changed
        })
        .reduce(|| false, |a, b| a || b)
}
