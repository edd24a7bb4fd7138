//! 2D geometry primitives for toolpath layout.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Represents a 2D point with X and Y coordinates in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns the point halfway between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Direction angle from this point to another, in radians,
    /// counter-clockwise from the positive X axis.
    pub fn bearing_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Returns this point translated by an offset vector.
    pub fn translate(&self, offset: Point) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }

    /// Returns this point rotated about a pivot by an angle in radians.
    pub fn rotate_about(&self, pivot: Point, angle_rad: f64) -> Point {
        if angle_rad.abs() < 1e-12 {
            return *self;
        }
        let cos_a = angle_rad.cos();
        let sin_a = angle_rad.sin();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point {
            x: pivot.x + dx * cos_a - dy * sin_a,
            y: pivot.y + dx * sin_a + dy * cos_a,
        }
    }
}

/// Translates every point in a slice by an offset vector.
pub fn translate_points(points: &[Point], offset: Point) -> Vec<Point> {
    points.iter().map(|p| p.translate(offset)).collect()
}

/// Rotates every point in a slice about a pivot by an angle in radians.
pub fn rotate_points(points: &[Point], pivot: Point, angle_rad: f64) -> Vec<Point> {
    points.iter().map(|p| p.rotate_about(pivot, angle_rad)).collect()
}

/// Generates the vertices of a regular polygon around a center point.
///
/// Vertices are listed counter-clockwise starting on the positive X axis.
pub fn regular_polygon_points(sides: usize, center: Point, circumradius: f64) -> Vec<Point> {
    debug_assert!(sides >= 3, "regular polygon needs at least 3 sides, got {sides}");
    debug_assert!(
        circumradius.is_finite() && circumradius > 0.0,
        "circumradius must be positive and finite, got {circumradius}"
    );
    (0..sides)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / sides as f64;
            Point::new(
                center.x + circumradius * angle.cos(),
                center.y + circumradius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < EPS);
        let m = a.midpoint(&b);
        assert!((m.x - 1.5).abs() < EPS);
        assert!((m.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_bearing() {
        let a = Point::new(1.0, 1.0);
        assert!((a.bearing_to(&Point::new(2.0, 1.0)) - 0.0).abs() < EPS);
        assert!((a.bearing_to(&Point::new(1.0, 2.0)) - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_about_pivot() {
        let p = Point::new(2.0, 0.0);
        let r = p.rotate_about(Point::new(1.0, 0.0), PI / 2.0);
        assert!((r.x - 1.0).abs() < EPS);
        assert!((r.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotate_zero_angle_is_identity() {
        let p = Point::new(3.25, -1.5);
        let r = p.rotate_about(Point::new(10.0, 10.0), 0.0);
        assert_eq!(p, r);
    }

    #[test]
    fn test_regular_polygon() {
        let pts = regular_polygon_points(6, Point::new(0.0, 0.0), 10.0);
        assert_eq!(pts.len(), 6);
        // All vertices on the circumcircle.
        for p in &pts {
            assert!((p.distance_to(&Point::new(0.0, 0.0)) - 10.0).abs() < EPS);
        }
        // First vertex on the positive X axis.
        assert!((pts[0].x - 10.0).abs() < EPS);
        assert!(pts[0].y.abs() < EPS);
        // Adjacent vertices are one side length apart.
        let side = pts[0].distance_to(&pts[1]);
        assert!((side - 10.0).abs() < EPS);
    }
}
