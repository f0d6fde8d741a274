use crate::error::KMeansError;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div};

/// A point in the plane. Also used for centroid positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Divide both coordinates by a point count.
    ///
    /// Returns `None` when `n` is 0.
    #[inline]
    pub fn checked_div(self, n: usize) -> Option<Point> {
        if n == 0 {
            None
        } else {
            Some(self / n as f64)
        }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Div<f64> for Point {
    type Output = Point;

    #[inline]
    fn div(self, divisor: f64) -> Point {
        Point::new(self.x / divisor, self.y / divisor)
    }
}

impl Sum for Point {
    fn sum<I: Iterator<Item = Point>>(iter: I) -> Point {
        iter.fold(Point::default(), Add::add)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Compute centroid shift (sum of distances each centroid moved)
pub fn centroid_shift(old_centroids: &[Point], new_centroids: &[Point]) -> f64 {
    old_centroids
        .iter()
        .zip(new_centroids)
        .map(|(old, new)| old.distance(new))
        .sum()
}

/// Read an `(n, 2)` array as a list of points
pub fn points_from_array(data: &ArrayView2<f64>) -> Result<Vec<Point>, KMeansError> {
    if data.ncols() != 2 {
        return Err(KMeansError::InvalidDimensions(format!(
            "Expected 2 features, got {}",
            data.ncols()
        )));
    }

    Ok(data
        .outer_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect())
}

/// Lay out points as an `(n, 2)` array
pub fn points_to_array(points: &[Point]) -> Array2<f64> {
    let mut array = Array2::zeros((points.len(), 2));
    for (mut row, p) in array.outer_iter_mut().zip(points) {
        row[0] = p.x;
        row[1] = p.y;
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);

        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_add_and_sum() {
        let total: Point = [Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(-1.0, 0.5)]
            .into_iter()
            .sum();

        assert_eq!(total, Point::new(3.0, 6.5));
    }

    #[test]
    fn test_checked_div() {
        let p = Point::new(4.0, 6.0);

        assert_eq!(p.checked_div(2), Some(Point::new(2.0, 3.0)));
        assert_eq!(p.checked_div(0), None);
    }

    #[test]
    fn test_centroid_shift() {
        let old = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let new = [Point::new(1.0, 0.0), Point::new(1.0, 1.0)];

        assert_relative_eq!(centroid_shift(&old, &new), 1.0);
    }

    #[test]
    fn test_array_conversion() {
        let data = array![[0.0, 1.0], [2.5, -3.0]];
        let points = points_from_array(&data.view()).unwrap();

        assert_eq!(points, vec![Point::new(0.0, 1.0), Point::new(2.5, -3.0)]);
        assert_eq!(points_to_array(&points), data);
    }

    #[test]
    fn test_array_wrong_width() {
        let data = array![[0.0, 1.0, 2.0]];
        assert!(matches!(
            points_from_array(&data.view()),
            Err(KMeansError::InvalidDimensions(_))
        ));
    }
}
