//! Headless world driver
//!
//! Owns the collision space, the balls and the run counters. Each frame every
//! ball takes one step in a stable order; the hit listeners of whatever it
//! struck run immediately, and the removals they queue are applied before the
//! next ball looks for collisions.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::MovingBody;
use super::block::{Block, BlockKind};
use super::events::{HitContext, HitEvent, SharedListener, WorldCommand, dispatch};
use super::listeners::{BallRemover, BlockRemover, GameCounters, ScoreTracker};
use super::paddle::{PADDLE_COLOR, Paddle};
use crate::collision::{BodyId, CollisionSpace, SharedSurface, SurfaceId};
use crate::consts::CLEAR_BONUS;
use crate::geometry::{AxisAlignedRectangle, Color, Point, Velocity};
use crate::settings::WorldSettings;

/// What happened during one call to [`World::step`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub collisions: u32,
    pub removed_surfaces: u32,
    pub lost_balls: u32,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    /// Every brick is gone
    Cleared,
    /// Every ball is gone
    OutOfBalls,
}

pub struct World {
    bounds: AxisAlignedRectangle,
    space: Rc<RefCell<CollisionSpace>>,
    balls: Vec<MovingBody>,
    paddle: Option<(SurfaceId, Rc<RefCell<Paddle>>)>,
    counters: GameCounters,
    frame: u64,
    next_ball_id: BodyId,
    bricks_added: u32,
    clear_bonus: i64,
    bonus_awarded: bool,
}

impl World {
    /// Empty world; `bounds` is only used to flag balls that escape it
    pub fn new(bounds: AxisAlignedRectangle) -> Self {
        Self {
            bounds,
            space: Rc::new(RefCell::new(CollisionSpace::new())),
            balls: Vec::new(),
            paddle: None,
            counters: GameCounters::default(),
            frame: 0,
            next_ball_id: 1,
            bricks_added: 0,
            clear_bonus: CLEAR_BONUS,
            bonus_awarded: false,
        }
    }

    /// Walls, a ball-eating floor, rows of bricks, the paddle and the balls
    pub fn classic(settings: &WorldSettings) -> Result<Self> {
        settings.validate()?;

        let w = settings.screen_width;
        let h = settings.screen_height;
        let t = settings.wall_thickness;
        let mut world = World::new(AxisAlignedRectangle::new(Point::ORIGIN, w, h, Color::BLACK));
        world.clear_bonus = settings.clear_bonus;

        // Borders
        for rect in [
            AxisAlignedRectangle::new(Point::new(0.0, 0.0), t, h, Color::GRAY),
            AxisAlignedRectangle::new(Point::new(w - t, 0.0), t, h, Color::GRAY),
            AxisAlignedRectangle::new(Point::new(0.0, 0.0), w, settings.top_margin, Color::GRAY),
        ] {
            world.add_block(Block::wall(rect));
        }

        // The floor sits just below the visible field and swallows balls
        let mut floor = Block::wall(AxisAlignedRectangle::new(Point::new(0.0, h), w, t, Color::GRAY));
        floor.add_hit_listener(Rc::new(RefCell::new(BallRemover)));
        world.add_block(floor);

        // Bricks
        let block_remover: SharedListener =
            Rc::new(RefCell::new(BlockRemover::new(settings.hits_to_remove)));
        let score: SharedListener = Rc::new(RefCell::new(ScoreTracker::default()));
        let right_edge = w - t;
        for (row, layout) in settings.rows.iter().enumerate() {
            let y = settings.first_row_y + row as f64 * settings.brick_height;
            for i in (1..=layout.count).rev() {
                let x = right_edge - f64::from(i) * settings.brick_width;
                let rect = AxisAlignedRectangle::new(
                    Point::new(x, y),
                    settings.brick_width,
                    settings.brick_height,
                    layout.color,
                );
                let mut brick = Block::brick(rect).with_policy(settings.notify_policy);
                brick.add_hit_listener(block_remover.clone());
                brick.add_hit_listener(score.clone());
                world.add_block(brick);
            }
        }

        // Paddle, centered
        let paddle_rect = AxisAlignedRectangle::new(
            Point::new((w - settings.paddle_width) / 2.0, settings.paddle_y),
            settings.paddle_width,
            settings.paddle_height,
            PADDLE_COLOR,
        );
        world.set_paddle(Paddle::new(paddle_rect, t, w - t, settings.paddle_step));

        // Balls, with seeded launch headings
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        for &spawn in &settings.ball_spawns {
            let angle = rng.random_range(settings.launch_angle_min..settings.launch_angle_max);
            let velocity = Velocity::from_angle_and_speed(angle, settings.ball_speed);
            world.add_ball(spawn, settings.ball_radius, Color::WHITE, velocity);
        }

        log::info!(
            "Classic world: {} surfaces, {} bricks, {} balls (seed {})",
            world.space.borrow().len(),
            world.bricks_added,
            world.balls.len(),
            settings.seed
        );
        Ok(world)
    }

    /// Register any surface, returning its id in the space
    pub fn add_surface(&mut self, surface: SharedSurface) -> SurfaceId {
        self.space.borrow_mut().add(surface)
    }

    /// Register a block; bricks count toward clearing the field
    pub fn add_block(&mut self, block: Block) -> SurfaceId {
        if block.kind() == BlockKind::Brick {
            self.bricks_added += 1;
            self.counters.remaining_blocks.increase(1);
        }
        self.add_surface(Rc::new(RefCell::new(block)))
    }

    /// Install the paddle, replacing any previous one
    pub fn set_paddle(&mut self, paddle: Paddle) -> SurfaceId {
        if let Some((old, _)) = self.paddle.take() {
            self.space.borrow_mut().remove(old);
        }
        let paddle = Rc::new(RefCell::new(paddle));
        let id = self.add_surface(paddle.clone());
        self.paddle = Some((id, paddle));
        id
    }

    pub fn paddle(&self) -> Option<Rc<RefCell<Paddle>>> {
        self.paddle.as_ref().map(|(_, p)| p.clone())
    }

    /// Add a ball bound to this world's space
    pub fn add_ball(&mut self, center: Point, radius: u32, color: Color, velocity: Velocity) -> BodyId {
        let id = self.next_ball_id;
        self.next_ball_id += 1;

        let mut ball = MovingBody::new(id, center, radius, color).with_velocity(velocity);
        ball.set_collision_space(&self.space);
        self.balls.push(ball);
        self.counters.remaining_balls.increase(1);
        id
    }

    pub fn space(&self) -> &Rc<RefCell<CollisionSpace>> {
        &self.space
    }

    pub fn balls(&self) -> &[MovingBody] {
        &self.balls
    }

    pub fn ball(&self, id: BodyId) -> Option<&MovingBody> {
        self.balls.iter().find(|b| b.id() == id)
    }

    pub fn counters(&self) -> &GameCounters {
        &self.counters
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn outcome(&self) -> Outcome {
        if self.bricks_added > 0 && self.counters.remaining_blocks.value() <= 0 {
            Outcome::Cleared
        } else if self.counters.remaining_balls.value() <= 0 {
            Outcome::OutOfBalls
        } else {
            Outcome::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome() != Outcome::Running
    }

    /// Nudge the paddle toward the ball closest to the floor
    pub fn autopilot(&mut self) {
        let Some((_, paddle)) = &self.paddle else {
            return;
        };
        let lowest = self
            .balls
            .iter()
            .max_by(|a, b| a.position().y.total_cmp(&b.position().y));
        if let Some(ball) = lowest {
            paddle.borrow_mut().move_toward(ball.position().x);
        }
    }

    /// Advance every ball by one frame
    pub fn step(&mut self) -> Result<FrameReport> {
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };

        let ids: Vec<BodyId> = self.balls.iter().map(|b| b.id()).collect();
        for id in ids {
            // Lost earlier this frame
            let Some(ball) = self.balls.iter_mut().find(|b| b.id() == id) else {
                continue;
            };

            let hitter = ball.hitter();
            let Some(collision) = ball
                .time_passed()
                .with_context(|| format!("frame {}: ball {} could not move", self.frame, id))?
            else {
                continue;
            };
            report.collisions += 1;

            let (listeners, surface_color) = {
                let surface = collision
                    .surface
                    .try_borrow()
                    .with_context(|| format!("surface {} is being mutated", collision.surface_id))?;
                (surface.hit_listeners(&hitter), surface.bounding_rectangle().color)
            };
            if listeners.is_empty() {
                continue;
            }

            let event = HitEvent {
                surface_id: collision.surface_id,
                surface_color,
                hitter,
                point: collision.point,
            };
            let mut ctx = HitContext::new(&mut self.counters);
            dispatch(&listeners, &event, &mut ctx);
            let commands = ctx.into_commands();
            self.apply(commands, &mut report)?;
        }

        for ball in &self.balls {
            if !self.bounds.contains_point(ball.position()) {
                log::warn!(
                    "Ball {} left the field at ({:.2}, {:.2})",
                    ball.id(),
                    ball.position().x,
                    ball.position().y
                );
            }
        }

        if !self.bonus_awarded && self.outcome() == Outcome::Cleared {
            self.bonus_awarded = true;
            self.counters.score.increase(self.clear_bonus);
            log::info!("Field cleared on frame {}, bonus {}", self.frame, self.clear_bonus);
        }

        Ok(report)
    }

    fn apply(&mut self, commands: Vec<WorldCommand>, report: &mut FrameReport) -> Result<()> {
        for command in commands {
            match command {
                WorldCommand::RemoveSurface(id) => {
                    let removed = self
                        .space
                        .try_borrow_mut()
                        .context("collision space is borrowed while applying removals")?
                        .remove(id);
                    if removed {
                        report.removed_surfaces += 1;
                    }
                }
                WorldCommand::RemoveBody(id) => {
                    let before = self.balls.len();
                    self.balls.retain(|b| b.id() != id);
                    if self.balls.len() != before {
                        report.lost_balls += 1;
                    }
                }
                WorldCommand::RecolorBody { body, color } => {
                    if let Some(ball) = self.balls.iter_mut().find(|b| b.id() == body) {
                        ball.set_color(color);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> AxisAlignedRectangle {
        AxisAlignedRectangle::new(Point::ORIGIN, 800.0, 600.0, Color::BLACK)
    }

    #[test]
    fn test_classic_layout() {
        let world = World::classic(&WorldSettings::default()).unwrap();
        // 3 walls, the floor, 57 bricks and the paddle
        assert_eq!(world.space().borrow().len(), 62);
        assert_eq!(world.counters().remaining_blocks.value(), 57);
        assert_eq!(world.counters().remaining_balls.value(), 3);
        assert_eq!(world.balls().len(), 3);
        assert_eq!(world.outcome(), Outcome::Running);
    }

    #[test]
    fn test_classic_is_deterministic() {
        let settings = WorldSettings::default();
        let mut a = World::classic(&settings).unwrap();
        let mut b = World::classic(&settings).unwrap();
        for _ in 0..500 {
            a.step().unwrap();
            b.step().unwrap();
        }
        let pa: Vec<Point> = a.balls().iter().map(|b| b.position()).collect();
        let pb: Vec<Point> = b.balls().iter().map(|b| b.position()).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.counters(), b.counters());
    }

    #[test]
    fn test_brick_hit_removes_and_scores() {
        let mut world = World::new(field());
        let mut brick = Block::brick(AxisAlignedRectangle::new(
            Point::new(105.0, 50.0),
            50.0,
            100.0,
            Color::rgb(242, 140, 40),
        ));
        brick.add_hit_listener(Rc::new(RefCell::new(BlockRemover::default())));
        brick.add_hit_listener(Rc::new(RefCell::new(ScoreTracker::default())));
        let id = world.add_block(brick);
        let ball = world.add_ball(Point::new(100.0, 100.0), 5, Color::WHITE, Velocity::new(5.0, 0.0));

        let report = world.step().unwrap();
        assert_eq!(report.collisions, 1);
        assert_eq!(report.removed_surfaces, 1);
        assert!(!world.space().borrow().contains(id));
        assert_eq!(world.ball(ball).unwrap().color(), Color::rgb(242, 140, 40));
        // hit points plus the clear bonus
        assert_eq!(world.counters().score.value(), 5 + CLEAR_BONUS);
        assert_eq!(world.outcome(), Outcome::Cleared);
    }

    #[test]
    fn test_floor_removes_ball() {
        let mut world = World::new(field());
        let mut floor = Block::wall(AxisAlignedRectangle::new(
            Point::new(0.0, 600.0),
            800.0,
            20.0,
            Color::GRAY,
        ));
        floor.add_hit_listener(Rc::new(RefCell::new(BallRemover)));
        world.add_block(floor);
        world.add_ball(Point::new(400.0, 598.0), 5, Color::WHITE, Velocity::new(0.0, 4.0));

        let report = world.step().unwrap();
        assert_eq!(report.lost_balls, 1);
        assert!(world.balls().is_empty());
        assert_eq!(world.outcome(), Outcome::OutOfBalls);
    }

    #[test]
    fn test_set_paddle_replaces_previous() {
        let mut world = World::new(field());
        let first = world.set_paddle(Paddle::classic());
        let second = world.set_paddle(Paddle::classic());
        assert_ne!(first, second);
        assert!(!world.space().borrow().contains(first));
        assert_eq!(world.space().borrow().len(), 1);
    }

    #[test]
    fn test_autopilot_follows_lowest_ball() {
        let mut world = World::new(field());
        world.set_paddle(Paddle::classic());
        world.add_ball(Point::new(700.0, 100.0), 5, Color::WHITE, Velocity::ZERO);
        world.add_ball(Point::new(100.0, 500.0), 5, Color::WHITE, Velocity::ZERO);

        world.autopilot();
        let paddle = world.paddle().unwrap();
        assert_eq!(paddle.borrow().rect().left(), 395.0);
    }
}
