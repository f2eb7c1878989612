//! Counters and the stock hit policies
//!
//! The counters belong to the driver and reach listeners only through
//! [`HitContext`], never through globals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::events::{HitContext, HitEvent, HitListener};
use crate::collision::SurfaceId;
use crate::consts::POINTS_PER_HIT;

/// Signed running count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    value: i64,
}

impl Counter {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn increase(&mut self, n: i64) {
        self.value += n;
    }

    pub fn decrease(&mut self, n: i64) {
        self.value -= n;
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Everything the driver tracks across a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCounters {
    pub remaining_blocks: Counter,
    pub remaining_balls: Counter,
    pub score: Counter,
}

/// Removes a brick once it has taken enough hits
///
/// The brick's color is handed to the ball that finished it off.
#[derive(Debug, Clone)]
pub struct BlockRemover {
    hits_to_remove: u32,
    hits_taken: HashMap<SurfaceId, u32>,
}

impl Default for BlockRemover {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BlockRemover {
    pub fn new(hits_to_remove: u32) -> Self {
        Self {
            hits_to_remove: hits_to_remove.max(1),
            hits_taken: HashMap::new(),
        }
    }
}

impl HitListener for BlockRemover {
    fn hit_event(&mut self, event: &HitEvent, ctx: &mut HitContext<'_>) {
        let taken = self.hits_taken.entry(event.surface_id).or_insert(0);
        *taken += 1;
        if *taken < self.hits_to_remove {
            return;
        }

        self.hits_taken.remove(&event.surface_id);
        ctx.remove_surface(event.surface_id);
        ctx.recolor_body(event.hitter.id, event.surface_color);
        ctx.counters.remaining_blocks.decrease(1);
        log::debug!(
            "Block {} removed by ball {}, {} left",
            event.surface_id,
            event.hitter.id,
            ctx.counters.remaining_blocks.value()
        );
    }
}

/// Takes any ball that touches the watched obstacle out of play
#[derive(Debug, Clone, Copy, Default)]
pub struct BallRemover;

impl HitListener for BallRemover {
    fn hit_event(&mut self, event: &HitEvent, ctx: &mut HitContext<'_>) {
        ctx.remove_body(event.hitter.id);
        ctx.counters.remaining_balls.decrease(1);
        log::debug!(
            "Ball {} lost, {} left",
            event.hitter.id,
            ctx.counters.remaining_balls.value()
        );
    }
}

/// Adds a fixed number of points per hit
#[derive(Debug, Clone, Copy)]
pub struct ScoreTracker {
    pub points_per_hit: i64,
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self {
            points_per_hit: POINTS_PER_HIT,
        }
    }
}

impl HitListener for ScoreTracker {
    fn hit_event(&mut self, _event: &HitEvent, ctx: &mut HitContext<'_>) {
        ctx.counters.score.increase(self.points_per_hit);
    }
}

/// Logs every hit it observes
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl HitListener for LoggingListener {
    fn hit_event(&mut self, event: &HitEvent, _ctx: &mut HitContext<'_>) {
        log::info!(
            "Block {} was hit by ball {} at ({:.1}, {:.1})",
            event.surface_id,
            event.hitter.id,
            event.point.x,
            event.point.y
        );
    }
}
