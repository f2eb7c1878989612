//! Collision queries against the set of active obstacles
//!
//! Obstacles are owned by whoever created them; the space only keeps shared
//! handles. A query snapshots membership first, so removals triggered while
//! resolving a hit never disturb the iteration that found it.

pub mod space;
pub mod surface;

pub use space::{CollisionReport, CollisionSpace, SpaceSnapshot, SurfaceId};
pub use surface::{BodyId, CollisionSurface, Hitter, SharedSurface};
