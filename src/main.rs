//! Brickbreak headless runner
//!
//! Lays out the classic field, then steps frames until every brick or every
//! ball is gone, or the frame limit is reached.
//!
//! Usage: `brickbreak [settings.json]`

use anyhow::Result;

use brickbreak::WorldSettings;
use brickbreak::sim::{Outcome, World};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Brickbreak (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => WorldSettings::load(path)?,
        None => WorldSettings::default(),
    };

    let mut world = World::classic(&settings)?;
    let mut collisions = 0u64;

    while !world.is_finished() && world.frame() < settings.max_frames {
        if settings.autopilot {
            world.autopilot();
        }
        let report = world.step()?;
        collisions += u64::from(report.collisions);
        if report.removed_surfaces > 0 || report.lost_balls > 0 {
            log::debug!(
                "Frame {}: {} surfaces removed, {} balls lost",
                report.frame,
                report.removed_surfaces,
                report.lost_balls
            );
        }
    }

    let counters = world.counters();
    match world.outcome() {
        Outcome::Cleared => log::info!("Field cleared in {} frames", world.frame()),
        Outcome::OutOfBalls => log::info!("Out of balls after {} frames", world.frame()),
        Outcome::Running => log::info!("Frame limit {} reached", settings.max_frames),
    }
    log::info!(
        "Score {}, {} bricks left, {} balls left, {} collisions",
        counters.score.value(),
        counters.remaining_blocks.value(),
        counters.remaining_balls.value(),
        collisions
    );

    println!(
        "score={} frames={} bricks_left={} balls_left={}",
        counters.score.value(),
        world.frame(),
        counters.remaining_blocks.value(),
        counters.remaining_balls.value()
    );
    Ok(())
}
