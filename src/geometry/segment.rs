//! Bounded line between two endpoints
//!
//! The segment is the engine's general "line" type: trajectories, rectangle
//! sides and bounded-mode borders are all segments. Intersection is decided
//! by dispatching on the vertical/sloped shape of both lines rather than by
//! a single parametric formula, so vertical sides never divide by zero.

use serde::{Deserialize, Serialize};

use super::{AxisAlignedRectangle, LinearEquation, Point};
use crate::consts::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub const fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Start and end coincide: the segment is a single point
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Middle of the segment; a point-segment has none
    pub fn midpoint(&self) -> Option<Point> {
        if self.is_degenerate() {
            return None;
        }
        Some(self.start.midpoint(self.end))
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    #[inline]
    pub fn equation(&self) -> LinearEquation {
        LinearEquation::from_points(self.start, self.end)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    /// Point lies within the segment's bounding box, boundary inclusive
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() - EPSILON
            && p.x <= self.max_x() + EPSILON
            && p.y >= self.min_y() - EPSILON
            && p.y <= self.max_y() + EPSILON
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        self.crossing(other).is_some()
    }

    /// Where the two segments meet, if they do
    ///
    /// For overlapping collinear segments the result is the end of the
    /// shared stretch nearest to `self.start`.
    pub fn intersection_point(&self, other: &Segment) -> Option<Point> {
        self.crossing(other)
    }

    /// All three segments intersect each other pairwise
    pub fn three_way_intersects(&self, a: &Segment, b: &Segment) -> bool {
        self.intersects(a) && self.intersects(b) && a.intersects(b)
    }

    /// Intersection with `rect`'s sides nearest to this segment's start
    ///
    /// Equal distances resolve to the first side in right, left, top, bottom
    /// order.
    pub fn closest_intersection_to_start(&self, rect: &AxisAlignedRectangle) -> Option<Point> {
        let mut closest: Option<(Point, f64)> = None;
        for p in rect.intersection_points(self) {
            let d = p.distance(self.start);
            match closest {
                Some((_, best)) if best <= d => {}
                _ => closest = Some((p, d)),
            }
        }
        closest.map(|(p, _)| p)
    }

    fn crossing(&self, other: &Segment) -> Option<Point> {
        if self.is_degenerate() || other.is_degenerate() {
            return None;
        }

        match (self.equation(), other.equation()) {
            (LinearEquation::Vertical { x: x1 }, LinearEquation::Vertical { x: x2 }) => {
                if x1 != x2 {
                    return None;
                }
                self.collinear_overlap(other)
            }
            (LinearEquation::Vertical { x }, sloped) | (sloped, LinearEquation::Vertical { x }) => {
                let candidate = Point::new(x, sloped.y_at(x)?);
                (self.contains(candidate) && other.contains(candidate)).then_some(candidate)
            }
            (e1, e2) => {
                if e1.is_parallel_to(&e2) {
                    return None;
                }
                if e1.equals(&e2) {
                    return self.collinear_overlap(other);
                }
                let candidate = e1.solve(&e2)?;
                (self.contains(candidate) && other.contains(candidate)).then_some(candidate)
            }
        }
    }

    /// Shared stretch of two segments lying on the same line
    fn collinear_overlap(&self, other: &Segment) -> Option<Point> {
        let candidates = [
            (self.start, other.contains(self.start)),
            (self.end, other.contains(self.end)),
            (other.start, self.contains(other.start)),
            (other.end, self.contains(other.end)),
        ];

        let mut nearest: Option<(Point, f64)> = None;
        for (p, inside) in candidates {
            if !inside {
                continue;
            }
            let d = p.distance(self.start);
            match nearest {
                Some((_, best)) if best <= d => {}
                _ => nearest = Some((p, d)),
            }
        }
        nearest.map(|(p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(x1, y1, x2, y2)
    }

    #[test]
    fn test_length_and_midpoint() {
        let s = seg(1.0, 2.0, 4.0, 6.0);
        assert!((s.length() - 5.0).abs() < 1e-9);
        assert_eq!(s.midpoint(), Some(Point::new(2.5, 4.0)));

        // Negative coordinates must not be mirrored
        let s = seg(-4.0, -2.0, -2.0, -2.0);
        assert_eq!(s.midpoint(), Some(Point::new(-3.0, -2.0)));
    }

    #[test]
    fn test_point_segment_has_no_midpoint() {
        assert_eq!(seg(3.0, 3.0, 3.0, 3.0).midpoint(), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let s = seg(0.0, 0.0, 10.0, 5.0);
        assert!(s.contains(Point::new(0.0, 0.0)));
        assert!(s.contains(Point::new(10.0, 5.0)));
        assert!(s.contains(Point::new(10.000_001, 5.0)));
        assert!(!s.contains(Point::new(10.1, 5.0)));
        assert!(!s.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_crossing_diagonals() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection_point(&b), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_lines_cross_outside_segments() {
        let a = seg(0.0, 0.0, 1.0, 1.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_point(&b), None);
    }

    #[test]
    fn test_parallel_segments() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 1.0, 10.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_vertical_against_sloped() {
        let v = seg(5.0, 0.0, 5.0, 10.0);
        let h = seg(0.0, 4.0, 10.0, 4.0);
        assert!(v.intersects(&h));
        assert!(h.intersects(&v));
        assert_eq!(v.intersection_point(&h), Some(Point::new(5.0, 4.0)));
        assert_eq!(h.intersection_point(&v), Some(Point::new(5.0, 4.0)));

        let short = seg(0.0, 4.0, 4.0, 4.0);
        assert!(!v.intersects(&short));
    }

    #[test]
    fn test_vertical_segments_apart() {
        let a = seg(5.0, 0.0, 5.0, 10.0);
        let b = seg(6.0, 0.0, 6.0, 10.0);
        assert!(!a.intersects(&b));

        let c = seg(5.0, 11.0, 5.0, 20.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_vertical_overlap_is_deterministic() {
        let a = seg(5.0, 0.0, 5.0, 10.0);
        let b = seg(5.0, 5.0, 5.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert_eq!(a.intersection_point(&b), Some(Point::new(5.0, 5.0)));
        assert_eq!(b.intersection_point(&a), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_vertical_containment_is_symmetric() {
        let outer = seg(5.0, 0.0, 5.0, 10.0);
        let inner = seg(5.0, 2.0, 5.0, 3.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
        assert_eq!(inner.intersection_point(&outer), Some(Point::new(5.0, 2.0)));
    }

    #[test]
    fn test_collinear_sloped_segments() {
        let a = seg(0.0, 0.0, 4.0, 4.0);
        let b = seg(2.0, 2.0, 8.0, 8.0);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection_point(&b), Some(Point::new(2.0, 2.0)));

        let far = seg(6.0, 6.0, 8.0, 8.0);
        assert!(!a.intersects(&far));
    }

    #[test]
    fn test_degenerate_never_intersects() {
        let p = seg(5.0, 5.0, 5.0, 5.0);
        let through = seg(0.0, 0.0, 10.0, 10.0);
        assert!(!p.intersects(&through));
        assert!(!through.intersects(&p));
        assert!(!p.intersects(&p));
    }

    #[test]
    fn test_three_way_intersects() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let c = seg(5.0, 0.0, 5.0, 10.0);
        assert!(a.three_way_intersects(&b, &c));

        let d = seg(20.0, 0.0, 20.0, 10.0);
        assert!(!a.three_way_intersects(&b, &d));
    }

    #[test]
    fn test_closest_intersection_to_start() {
        let rect = AxisAlignedRectangle::new(Point::new(4.0, 4.0), 2.0, 2.0, Color::BLACK);
        let s = seg(0.0, 0.0, 10.0, 10.0);
        assert_eq!(s.closest_intersection_to_start(&rect), Some(Point::new(4.0, 4.0)));

        let reversed = seg(10.0, 10.0, 0.0, 0.0);
        assert_eq!(
            reversed.closest_intersection_to_start(&rect),
            Some(Point::new(6.0, 6.0))
        );
    }

    #[test]
    fn test_closest_intersection_outside_rect() {
        let rect = AxisAlignedRectangle::new(Point::new(4.0, 4.0), 2.0, 2.0, Color::BLACK);
        assert_eq!(seg(0.0, 0.0, 3.0, 3.0).closest_intersection_to_start(&rect), None);
        assert_eq!(seg(0.0, 10.0, 10.0, 10.0).closest_intersection_to_start(&rect), None);
    }
}
