//! Capability every obstacle implements to take part in collision queries

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{AxisAlignedRectangle, Color, Point, Velocity};
use crate::sim::events::SharedListener;

/// Identifier of a moving body
pub type BodyId = u32;

/// Read-only view of the body that struck a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitter {
    pub id: BodyId,
    pub color: Color,
    pub position: Point,
    pub radius: u32,
}

/// An obstacle the collision space can query and bounce bodies off
///
/// `hit` must stay free of side effects. Anything that should happen because
/// of a hit (scoring, removal, recoloring) is expressed through the
/// listeners returned by [`CollisionSurface::hit_listeners`], which the
/// driver notifies once the new velocity is in place.
pub trait CollisionSurface {
    /// Bounds used for intersection tests
    fn bounding_rectangle(&self) -> AxisAlignedRectangle;

    /// Velocity after `hitter` strikes this surface at `collision_point`
    fn hit(&self, hitter: &Hitter, collision_point: Point, velocity: Velocity) -> Velocity;

    /// Observers to notify about a hit by `hitter`
    fn hit_listeners(&self, _hitter: &Hitter) -> Vec<SharedListener> {
        Vec::new()
    }
}

/// Handle through which the space and the driver share an obstacle
pub type SharedSurface = Rc<RefCell<dyn CollisionSurface>>;
