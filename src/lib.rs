//! Brickbreak - collision engine for a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `geometry`: Points, velocities, line equations, segments, rectangles
//! - `collision`: Collision surfaces and the space that queries them
//! - `sim`: Moving bodies, obstacles, hit listeners and a headless world driver
//! - `settings`: Data-driven world configuration

pub mod collision;
pub mod geometry;
pub mod settings;
pub mod sim;

pub use collision::{CollisionReport, CollisionSpace, CollisionSurface, SurfaceId};
pub use geometry::{AxisAlignedRectangle, Color, LinearEquation, Point, Segment, Velocity};
pub use settings::WorldSettings;

/// Engine constants
pub mod consts {
    /// Tolerance for every coordinate, slope and intercept comparison
    pub const EPSILON: f64 = 1e-5;
    /// How close a collision point must be to a face to count as hitting it
    pub const HIT_THRESHOLD: f64 = 1e-5;

    /// Number of equal-width regions the paddle is split into
    pub const PADDLE_REGIONS: usize = 5;
    /// Outgoing heading per paddle region (degrees clockwise from up);
    /// `None` reflects the vertical component only
    pub const PADDLE_REGION_ANGLES: [Option<f64>; PADDLE_REGIONS] =
        [Some(-60.0), Some(330.0), None, Some(30.0), Some(60.0)];

    /// Classic playfield
    pub const SCREEN_WIDTH: f64 = 800.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;
    pub const WALL_THICKNESS: f64 = 20.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 80.0;
    pub const PADDLE_HEIGHT: f64 = 20.0;
    pub const PADDLE_STEP: f64 = 5.0;

    /// Points awarded per brick hit
    pub const POINTS_PER_HIT: i64 = 5;
    /// Bonus for clearing every brick
    pub const CLEAR_BONUS: i64 = 100;
}

/// Compare two reals within [`consts::EPSILON`]
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= consts::EPSILON
}
