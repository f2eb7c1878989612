//! The ball: a moving circular body
//!
//! Two motion modes share the same reflection idea:
//! - queried: ask the [`CollisionSpace`] for the nearest obstacle on the
//!   trajectory (the real physics path, see [`MovingBody::time_passed`])
//! - bounded: test a fixed list of [`Border`] lines, used by standalone
//!   bouncing-ball setups without a space

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::collision::{BodyId, CollisionReport, CollisionSpace, Hitter};
use crate::geometry::{AxisAlignedRectangle, Color, Point, Segment, Velocity};

/// A ball moving through the field
#[derive(Debug, Clone)]
pub struct MovingBody {
    id: BodyId,
    position: Point,
    radius: u32,
    velocity: Velocity,
    color: Color,
    /// Which border set applies in bounded mode
    inside_region: bool,
    /// Space queried each step; not owned
    space: Weak<RefCell<CollisionSpace>>,
}

impl MovingBody {
    pub fn new(id: BodyId, center: Point, radius: u32, color: Color) -> Self {
        Self {
            id,
            position: center,
            radius,
            velocity: Velocity::ZERO,
            color,
            inside_region: true,
            space: Weak::new(),
        }
    }

    pub fn with_velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn inside_region(&self) -> bool {
        self.inside_region
    }

    pub fn set_inside_region(&mut self, inside: bool) {
        self.inside_region = inside;
    }

    /// Attach the space this body queries in [`Self::time_passed`]
    pub fn set_collision_space(&mut self, space: &Rc<RefCell<CollisionSpace>>) {
        self.space = Rc::downgrade(space);
    }

    /// View of this body handed to the surface it strikes
    pub fn hitter(&self) -> Hitter {
        Hitter {
            id: self.id,
            color: self.color,
            position: self.position,
            radius: self.radius,
        }
    }

    /// Path covered by the next unobstructed step
    pub fn trajectory(&self) -> Segment {
        Segment::new(self.position, self.velocity.apply(self.position))
    }

    /// Advance one frame against the collision space
    ///
    /// On a collision the struck surface decides the new velocity and the
    /// body only covers a quarter of the step (halfway to the trajectory's
    /// midpoint), so it stays clear of the face it bounced off. The report is
    /// returned so the caller can notify the surface's listeners.
    ///
    /// Fails if no collision space is attached or it has been dropped.
    pub fn time_passed(&mut self) -> Result<Option<CollisionReport>> {
        let space = self
            .space
            .upgrade()
            .with_context(|| format!("ball {} has no collision space", self.id))?;

        let trajectory = self.trajectory();
        let snapshot = space
            .try_borrow()
            .context("collision space is being mutated")?
            .snapshot();

        let Some(report) = snapshot.closest_collision(&trajectory) else {
            self.position = self.velocity.apply(self.position);
            return Ok(None);
        };

        let hitter = self.hitter();
        let velocity = report
            .surface
            .try_borrow()
            .with_context(|| format!("surface {} is being mutated", report.surface_id))?
            .hit(&hitter, report.point, self.velocity);
        self.velocity = velocity;

        if let Some(mid) = trajectory.midpoint() {
            self.position = self.position.midpoint(mid);
        }

        log::debug!(
            "Ball {} hit surface {} at ({:.2}, {:.2}), new velocity ({:.2}, {:.2})",
            self.id,
            report.surface_id,
            report.point.x,
            report.point.y,
            velocity.dx,
            velocity.dy
        );

        Ok(Some(report))
    }

    /// Advance one frame reflecting off a fixed list of borders
    ///
    /// Horizontal and vertical reflections are independent, so a corner
    /// flips both components in the same step.
    pub fn step_bounded(&mut self, borders: &[Border]) -> Reflection {
        let mut reflection = Reflection::default();
        for border in borders {
            if border.is_hit_by(self.position, self.radius, self.velocity) {
                if border.blocks.is_horizontal() {
                    reflection.dx = true;
                } else {
                    reflection.dy = true;
                }
            }
        }

        if reflection.dx {
            self.velocity = self.velocity.flip_dx();
        }
        if reflection.dy {
            self.velocity = self.velocity.flip_dy();
        }
        self.position = self.velocity.apply(self.position);
        reflection
    }

    /// Bounded step using `inside` or `outside` according to the region flag
    pub fn step_in_region(&mut self, inside: &[Border], outside: &[Border]) -> Reflection {
        if self.inside_region {
            self.step_bounded(inside)
        } else {
            self.step_bounded(outside)
        }
    }
}

/// Which velocity components a bounded step reversed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub dx: bool,
    pub dy: bool,
}

/// Direction of travel a border stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Blocks {
    Rightward,
    Leftward,
    Upward,
    Downward,
}

impl Blocks {
    /// Stops horizontal travel (the border is a vertical line)
    pub fn is_horizontal(self) -> bool {
        matches!(self, Blocks::Rightward | Blocks::Leftward)
    }
}

/// A one-way line for bounded-mode reflection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub line: Segment,
    pub blocks: Blocks,
}

impl Border {
    pub fn new(line: Segment, blocks: Blocks) -> Self {
        Self { line, blocks }
    }

    /// The 4 lines keeping a body inside `frame`
    pub fn inner_walls(frame: &AxisAlignedRectangle) -> [Border; 4] {
        let [right, left, top, bottom] = frame.boundary_segments();
        [
            Border::new(right, Blocks::Rightward),
            Border::new(left, Blocks::Leftward),
            Border::new(top, Blocks::Upward),
            Border::new(bottom, Blocks::Downward),
        ]
    }

    /// The 4 lines keeping a body out of `obstacle`
    pub fn outer_walls(obstacle: &AxisAlignedRectangle) -> [Border; 4] {
        let [right, left, top, bottom] = obstacle.boundary_segments();
        [
            Border::new(right, Blocks::Leftward),
            Border::new(left, Blocks::Rightward),
            Border::new(top, Blocks::Downward),
            Border::new(bottom, Blocks::Upward),
        ]
    }

    /// The 6-line set: inside `frame`, bouncing off the left and top faces of
    /// `obstacle` sitting in its lower-right corner
    pub fn frame_with_corner_obstacle(
        frame: &AxisAlignedRectangle,
        obstacle: &AxisAlignedRectangle,
    ) -> Vec<Border> {
        let [_, left, top, _] = Border::outer_walls(obstacle);
        let mut borders = Border::inner_walls(frame).to_vec();
        borders.extend([left, top]);
        borders
    }

    /// Body at `position` moving by `velocity` touches this border (or would
    /// tunnel through it this step) while heading the blocked way
    pub fn is_hit_by(&self, position: Point, radius: u32, velocity: Velocity) -> bool {
        let r = f64::from(radius);
        let Point { x, y } = position;

        match self.blocks {
            Blocks::Rightward | Blocks::Leftward => {
                let lx = self.line.start.x;
                let mut touching = x - r <= lx && lx <= x + r;
                if r <= velocity.dx.abs() {
                    touching = touching
                        || match self.blocks {
                            Blocks::Rightward => x + velocity.dx - r >= lx && x + r <= lx,
                            _ => x + velocity.dx + r <= lx && x - r >= lx,
                        };
                }
                let in_span = self.line.min_y() <= y && y <= self.line.max_y();
                let heading = match self.blocks {
                    Blocks::Rightward => velocity.dx >= 0.0,
                    _ => velocity.dx <= 0.0,
                };
                touching && in_span && heading
            }
            Blocks::Upward | Blocks::Downward => {
                let ly = self.line.start.y;
                let mut touching = y - r <= ly && ly <= y + r;
                if r <= velocity.dy.abs() {
                    touching = touching
                        || match self.blocks {
                            Blocks::Downward => y + velocity.dy - r >= ly && y + r <= ly,
                            _ => y + velocity.dy + r <= ly && y - r >= ly,
                        };
                }
                let in_span = self.line.min_x() <= x && x <= self.line.max_x();
                let heading = match self.blocks {
                    Blocks::Downward => velocity.dy >= 0.0,
                    _ => velocity.dy <= 0.0,
                };
                touching && in_span && heading
            }
        }
    }
}
