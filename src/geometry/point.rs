//! 2D point with tolerance-based equality

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{LinearEquation, Segment};
use crate::approx_eq;

/// A coordinate in screen space (y grows downward)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        DVec2::from(*self).distance(DVec2::from(other))
    }

    /// Perpendicular distance to the infinite line through `line`
    ///
    /// A degenerate segment has no direction, so the distance to its start
    /// point is returned instead.
    pub fn distance_to_line(&self, line: &Segment) -> f64 {
        if line.is_degenerate() {
            return self.distance(line.start);
        }
        match line.equation() {
            LinearEquation::Vertical { x } => (self.x - x).abs(),
            LinearEquation::Sloped { slope, intercept } => {
                (slope * self.x - self.y + intercept).abs() / (slope * slope + 1.0).sqrt()
            }
        }
    }

    /// Point halfway between `self` and `other`
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        DVec2::from(*self).lerp(DVec2::from(other), 0.5).into()
    }
}

/// Equal when both coordinates are within [`crate::consts::EPSILON`]
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-9);
        assert!((b.distance(a) - 5.0).abs() < 1e-9);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_equality_uses_tolerance() {
        let a = Point::new(3.0, 3.0);
        assert_eq!(a, Point::new(3.000_009, 2.999_991));
        assert_ne!(a, Point::new(3.0001, 3.0));
        assert_ne!(a, Point::new(3.0, 2.9));
    }

    #[test]
    fn test_distance_to_sloped_line() {
        // y = x, point (0, 2): distance is 2 / sqrt(2)
        let line = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let d = Point::new(0.0, 2.0).distance_to_line(&line);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_vertical_line() {
        let line = Segment::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0));
        assert!((Point::new(1.0, 50.0).distance_to_line(&line) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_degenerate_line() {
        let line = Segment::new(Point::new(3.0, 4.0), Point::new(3.0, 4.0));
        assert!((Point::ORIGIN.distance_to_line(&line) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint() {
        let m = Point::new(-2.0, 4.0).midpoint(Point::new(2.0, 8.0));
        assert_eq!(m, Point::new(0.0, 6.0));
    }
}
