//! Rectangular obstacles: bricks and walls

use std::fmt;

use serde::{Deserialize, Serialize};

use super::events::{HitListeners, ListenerId, SharedListener};
use crate::collision::{CollisionSurface, Hitter};
use crate::consts::HIT_THRESHOLD;
use crate::geometry::{AxisAlignedRectangle, Point, Velocity};

/// Obstacle flavours; both bounce the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Counts toward clearing the field
    #[default]
    Brick,
    /// Permanent border
    Wall,
}

/// When a block tells its listeners about a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotifyPolicy {
    Always,
    /// Stay quiet when the ball already carries the block's color
    #[default]
    UnlessColorMatches,
}

/// A static rectangle that reflects balls off whichever face they strike
pub struct Block {
    rect: AxisAlignedRectangle,
    kind: BlockKind,
    policy: NotifyPolicy,
    listeners: HitListeners,
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("rect", &self.rect)
            .field("kind", &self.kind)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Block {
    pub fn new(rect: AxisAlignedRectangle, kind: BlockKind) -> Self {
        Self {
            rect,
            kind,
            policy: NotifyPolicy::default(),
            listeners: HitListeners::default(),
        }
    }

    pub fn brick(rect: AxisAlignedRectangle) -> Self {
        Self::new(rect, BlockKind::Brick)
    }

    pub fn wall(rect: AxisAlignedRectangle) -> Self {
        Self::new(rect, BlockKind::Wall)
    }

    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rect(&self) -> AxisAlignedRectangle {
        self.rect
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn add_hit_listener(&mut self, listener: SharedListener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_hit_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Ball already wears this block's color
    pub fn color_matches(&self, hitter: &Hitter) -> bool {
        hitter.color == self.rect.color
    }
}

impl CollisionSurface for Block {
    fn bounding_rectangle(&self) -> AxisAlignedRectangle {
        self.rect
    }

    fn hit(&self, _hitter: &Hitter, collision_point: Point, velocity: Velocity) -> Velocity {
        reflect_off_face(&self.rect, collision_point, velocity)
    }

    fn hit_listeners(&self, hitter: &Hitter) -> Vec<SharedListener> {
        match self.policy {
            NotifyPolicy::UnlessColorMatches if self.color_matches(hitter) => Vec::new(),
            _ => self.listeners.snapshot(),
        }
    }
}

/// Reverse the velocity component that points into the struck face
///
/// Top and bottom faces are checked first, so a corner hit only flips `dy`.
/// A point on no face leaves the velocity unchanged.
pub fn reflect_off_face(rect: &AxisAlignedRectangle, point: Point, velocity: Velocity) -> Velocity {
    let near = |a: f64, b: f64| (a - b).abs() <= HIT_THRESHOLD;

    if near(point.y, rect.top()) || near(point.y, rect.bottom()) {
        return velocity.flip_dy();
    }
    if near(point.x, rect.left()) || near(point.x, rect.right()) {
        return velocity.flip_dx();
    }
    velocity
}
