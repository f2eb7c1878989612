//! Infinite line through two points
//!
//! Vertical lines have no finite slope and are kept as their own variant, so
//! no division by zero ever reaches the slope/intercept arithmetic.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::approx_eq;

/// Line in `y = slope * x + intercept` form, or `x = const`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LinearEquation {
    Sloped { slope: f64, intercept: f64 },
    Vertical { x: f64 },
}

impl LinearEquation {
    /// Horizontal line through the origin, used for degenerate input
    pub const ZERO: LinearEquation = LinearEquation::Sloped {
        slope: 0.0,
        intercept: 0.0,
    };

    /// Line through `p1` and `p2`
    ///
    /// Coincident points define no line and collapse to [`Self::ZERO`].
    pub fn from_points(p1: Point, p2: Point) -> Self {
        if p1 == p2 {
            return Self::ZERO;
        }
        if p1.x == p2.x {
            return Self::Vertical { x: p1.x };
        }
        let slope = (p1.y - p2.y) / (p1.x - p2.x);
        Self::Sloped {
            slope,
            intercept: p1.y - slope * p1.x,
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Evaluate the line at `x` (`None` for a vertical line)
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Self::Sloped { slope, intercept } => Some(slope * x + intercept),
            Self::Vertical { .. } => None,
        }
    }

    /// Same line, within tolerance
    pub fn equals(&self, other: &Self) -> bool {
        match (*self, *other) {
            (
                Self::Sloped { slope: m1, intercept: b1 },
                Self::Sloped { slope: m2, intercept: b2 },
            ) => approx_eq(m1, m2) && approx_eq(b1, b2),
            (Self::Vertical { x: x1 }, Self::Vertical { x: x2 }) => approx_eq(x1, x2),
            _ => false,
        }
    }

    fn same_direction(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Sloped { slope: m1, .. }, Self::Sloped { slope: m2, .. }) => approx_eq(m1, m2),
            (Self::Vertical { .. }, Self::Vertical { .. }) => true,
            _ => false,
        }
    }

    /// Distinct lines with the same direction
    pub fn is_parallel_to(&self, other: &Self) -> bool {
        self.same_direction(other) && !self.equals(other)
    }

    /// Lines meet somewhere (coincident lines meet everywhere)
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_parallel_to(other)
    }

    /// The unique crossing point of two lines
    ///
    /// Returns `None` for parallel and for coincident lines.
    pub fn solve(&self, other: &Self) -> Option<Point> {
        if self.same_direction(other) {
            return None;
        }
        match (*self, *other) {
            (
                Self::Sloped { slope: m1, intercept: b1 },
                Self::Sloped { slope: m2, intercept: b2 },
            ) => {
                let x = (b2 - b1) / (m1 - m2);
                Some(Point::new(x, m1 * x + b1))
            }
            (Self::Vertical { x }, sloped) | (sloped, Self::Vertical { x }) => {
                sloped.y_at(x).map(|y| Point::new(x, y))
            }
        }
    }
}
