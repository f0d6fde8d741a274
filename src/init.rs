use crate::point::Point;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Generate `count` points with both coordinates drawn uniformly from
/// `[0, max_coordinate)`.
///
/// `max_coordinate` must be positive and finite.
pub fn generate_points<R: Rng + ?Sized>(
    count: usize,
    max_coordinate: f64,
    rng: &mut R,
) -> Vec<Point> {
    let coordinate = Uniform::new(0.0, max_coordinate);

    (0..count)
        .map(|_| {
            let x = coordinate.sample(rng);
            let y = coordinate.sample(rng);
            Point::new(x, y)
        })
        .collect()
}

/// Initial centroids are the first `k` points, taken verbatim.
///
/// Callers guarantee `points.len() >= k`.
pub fn seed_centroids(points: &[Point], k: usize) -> Vec<Point> {
    points[..k].to_vec()
}
