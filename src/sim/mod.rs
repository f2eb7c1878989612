//! Simulation module
//!
//! Moving bodies, the obstacles they bounce off, and the driver that steps
//! them. Deterministic by construction:
//! - one step per ball per frame, no wall-clock time
//! - seeded RNG only
//! - stable iteration order (insertion order of balls and surfaces)

pub mod ball;
pub mod block;
pub mod events;
pub mod listeners;
pub mod paddle;
pub mod world;

pub use ball::{Blocks, Border, MovingBody, Reflection};
pub use block::{Block, BlockKind, NotifyPolicy, reflect_off_face};
pub use events::{HitContext, HitEvent, HitListener, ListenerId, SharedListener, WorldCommand};
pub use listeners::{BallRemover, BlockRemover, Counter, GameCounters, LoggingListener, ScoreTracker};
pub use paddle::Paddle;
pub use world::{FrameReport, Outcome, World};
