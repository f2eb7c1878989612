//! Geometry primitives
//!
//! Plain `Copy` values: every accessor hands out an independent copy, so a
//! caller can never mutate a point or rectangle another owner still holds.

pub mod equation;
pub mod point;
pub mod rectangle;
pub mod segment;
pub mod velocity;

pub use equation::LinearEquation;
pub use point::Point;
pub use rectangle::{AxisAlignedRectangle, Color, Side};
pub use segment::Segment;
pub use velocity::Velocity;
