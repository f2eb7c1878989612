//! Per-step displacement

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::Point;
use crate::approx_eq;

/// Displacement applied to a body once per simulated step
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Build a velocity from a heading and a speed
    ///
    /// The angle is in degrees, measured clockwise from straight up on screen
    /// (0° moves toward negative y, 90° toward positive x). A negative speed
    /// points the velocity the opposite way.
    pub fn from_angle_and_speed(angle_deg: f64, speed: f64) -> Self {
        let theta = angle_deg.to_radians();
        Self {
            dx: speed * theta.sin(),
            dy: -speed * theta.cos(),
        }
    }

    /// Translate a point by one step
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x + self.dx, p.y + self.dy)
    }

    /// Magnitude of the displacement
    #[inline]
    pub fn speed(&self) -> f64 {
        DVec2::from(*self).length()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        approx_eq(self.dx, 0.0) && approx_eq(self.dy, 0.0)
    }

    /// Same velocity with the horizontal component reversed
    #[inline]
    pub fn flip_dx(self) -> Self {
        Self::new(-self.dx, self.dy)
    }

    /// Same velocity with the vertical component reversed
    #[inline]
    pub fn flip_dy(self) -> Self {
        Self::new(self.dx, -self.dy)
    }
}

impl PartialEq for Velocity {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.dx, other.dx) && approx_eq(self.dy, other.dy)
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { dx: v.x, dy: v.y }
    }
}

impl From<Velocity> for DVec2 {
    fn from(v: Velocity) -> Self {
        DVec2::new(v.dx, v.dy)
    }
}
