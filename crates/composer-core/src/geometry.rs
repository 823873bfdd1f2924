//! Geometric primitives for diagram positioning.
//!
//! Composer uses the screen coordinate system of the diagram canvas:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are `f64` so positions saved by the editor are reproduced
//! exactly when a layout is reloaded.

use serde::{Deserialize, Serialize};

/// A 2D point representing a node position on the diagram canvas.
///
/// # Examples
///
/// ```
/// # use composer_core::geometry::Point;
/// let p1 = Point::new(100.0, 50.0);
/// let moved = p1.offset(50.0, 50.0);
/// assert_eq!(moved.x(), 150.0);
/// assert_eq!(moved.y(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Returns a new point shifted by `dx` and `dy`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns a new point with absolute values of both coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Checks whether `other` lies strictly closer than `threshold` on both axes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use composer_core::geometry::Point;
    /// let a = Point::new(100.0, 100.0);
    /// assert!(a.is_near(Point::new(120.0, 130.0), 50.0));
    /// assert!(!a.is_near(Point::new(120.0, 150.0), 50.0));
    /// ```
    pub fn is_near(self, other: Point, threshold: f64) -> bool {
        let delta = self.sub_point(other).abs();
        delta.x < threshold && delta.y < threshold
    }

    /// Checks that both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_accessors() {
        let p = Point::new(3.5, -2.0);
        assert_approx_eq!(f64, p.x(), 3.5);
        assert_approx_eq!(f64, p.y(), -2.0);

        let p = p.with_x(1.0).with_y(4.0);
        assert_eq!(p, Point::new(1.0, 4.0));
    }

    #[test]
    fn test_offset_and_sub() {
        let p = Point::new(120.0, 300.0).offset(50.0, 50.0);
        assert_eq!(p, Point::new(170.0, 350.0));

        let delta = Point::new(10.0, 10.0).sub_point(Point::new(30.0, 5.0));
        assert_eq!(delta, Point::new(-20.0, 5.0));
        assert_eq!(delta.abs(), Point::new(20.0, 5.0));
    }

    #[test]
    fn test_is_near_requires_both_axes() {
        let p = Point::new(0.0, 0.0);
        assert!(p.is_near(Point::new(49.0, -49.0), 50.0));
        assert!(!p.is_near(Point::new(50.0, 0.0), 50.0));
        assert!(!p.is_near(Point::new(0.0, 250.0), 50.0));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_serde_shape() {
        let p: Point = serde_json::from_str(r#"{"x": 500, "y": 500.5}"#).unwrap();
        assert_eq!(p, Point::new(500.0, 500.5));
        assert_eq!(
            serde_json::to_value(p).unwrap(),
            serde_json::json!({"x": 500.0, "y": 500.5})
        );
    }
}
