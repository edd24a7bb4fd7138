//! Batch array layouts for cutting many instances of a shape.

use keymill_core::geometry::Point;

/// Generates a serpentine grid of cut start points.
///
/// Rows are walked bottom to top; alternate rows are reversed so
/// consecutive cuts stay adjacent and transit moves stay short.
pub fn serpentine_array_points(rows: usize, cols: usize, x_step: f64, y_step: f64) -> Vec<Point> {
    let mut points = Vec::with_capacity(rows * cols);
    let mut y = 0.0;
    for row in 0..rows {
        let mut row_points: Vec<Point> = (0..cols)
            .map(|col| Point::new(col as f64 * x_step, y))
            .collect();
        if row % 2 == 0 {
            row_points.reverse();
        }
        points.extend(row_points);
        y += y_step;
    }
    points
}

/// Grid step for a batch of keystem sites: the support square, the kerf
/// on both sides, and the gap between neighbouring cuts.
pub fn keystem_array_step(support_size: f64, endmill: f64, spacing: f64) -> f64 {
    support_size + 2.0 * endmill + spacing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serpentine_row_order() {
        let points = serpentine_array_points(3, 4, 10.0, 8.0);
        assert_eq!(points.len(), 12);

        // First row is reversed, second left to right, third reversed.
        assert_eq!(points[0], Point::new(30.0, 0.0));
        assert_eq!(points[3], Point::new(0.0, 0.0));
        assert_eq!(points[4], Point::new(0.0, 8.0));
        assert_eq!(points[7], Point::new(30.0, 8.0));
        assert_eq!(points[8], Point::new(30.0, 16.0));
    }

    #[test]
    fn test_consecutive_points_are_adjacent() {
        let points = serpentine_array_points(4, 6, 9.8, 8.2);
        for pair in points.windows(2) {
            let d = pair[0].distance_to(&pair[1]);
            assert!(d <= (9.8f64.powi(2) + 8.2f64.powi(2)).sqrt() + 1e-9);
        }
    }

    #[test]
    fn test_keystem_step() {
        assert!((keystem_array_step(6.8, 1.0, 1.0) - 9.8).abs() < 1e-9);
    }
}
