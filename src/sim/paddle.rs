//! The player's paddle
//!
//! Unlike a block, the paddle ignores which face was struck. Its width is
//! split into equal regions and the region under the collision point picks
//! the outgoing heading, which lets the player aim.

use serde::{Deserialize, Serialize};

use crate::collision::{CollisionSurface, Hitter};
use crate::consts::*;
use crate::geometry::{AxisAlignedRectangle, Color, Point, Velocity};

pub const PADDLE_COLOR: Color = Color::rgb(222, 49, 99);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    rect: AxisAlignedRectangle,
    /// Leftmost x the paddle may reach before wrapping
    left_bound: f64,
    /// Rightmost x the paddle may reach before wrapping
    right_bound: f64,
    /// Horizontal distance per move
    step: f64,
}

impl Paddle {
    pub fn new(rect: AxisAlignedRectangle, left_bound: f64, right_bound: f64, step: f64) -> Self {
        Self {
            rect,
            left_bound,
            right_bound,
            step,
        }
    }

    /// Paddle of the classic 800x600 field, resting above the bottom wall
    pub fn classic() -> Self {
        Self::new(
            AxisAlignedRectangle::new(
                Point::new(400.0, 560.0),
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
                PADDLE_COLOR,
            ),
            WALL_THICKNESS,
            SCREEN_WIDTH - WALL_THICKNESS,
            PADDLE_STEP,
        )
    }

    pub fn rect(&self) -> AxisAlignedRectangle {
        self.rect
    }

    /// Horizontal center of the paddle
    pub fn center_x(&self) -> f64 {
        self.rect.left() + self.rect.width() / 2.0
    }

    /// Move one step left, reappearing at the right wall once the left wall is reached
    pub fn move_left(&mut self) {
        let mut x = self.rect.left();
        if x <= self.left_bound {
            x = self.right_bound - self.rect.width();
        }
        self.rect = self.rect.moved_to(Point::new(x - self.step, self.rect.top()));
    }

    /// Move one step right, reappearing at the left wall once the right wall is reached
    pub fn move_right(&mut self) {
        let mut x = self.rect.left();
        if self.rect.right() >= self.right_bound {
            x = self.left_bound;
        }
        self.rect = self.rect.moved_to(Point::new(x + self.step, self.rect.top()));
    }

    /// Take at most one step so the paddle's center approaches `target_x`
    pub fn move_toward(&mut self, target_x: f64) {
        let center = self.center_x();
        if target_x < center - self.step {
            self.move_left();
        } else if target_x > center + self.step {
            self.move_right();
        }
    }

    /// Zero-based region under `point`, if it lies over the paddle
    ///
    /// Region bounds are inclusive on both ends; on a shared bound the lower
    /// region wins.
    pub fn region_of(&self, point: Point) -> Option<usize> {
        let offset = point.x - self.rect.left();
        let region_len = self.rect.width() / PADDLE_REGIONS as f64;

        (0..PADDLE_REGIONS).find(|&i| {
            offset >= region_len * i as f64 && offset <= region_len * (i + 1) as f64
        })
    }
}

impl CollisionSurface for Paddle {
    fn bounding_rectangle(&self) -> AxisAlignedRectangle {
        self.rect
    }

    fn hit(&self, _hitter: &Hitter, collision_point: Point, velocity: Velocity) -> Velocity {
        // Speed carries the sign that squaring would lose for diagonal headings
        let mut speed = velocity.speed();
        if (velocity.dx < 0.0 && velocity.dy > 0.0) || (velocity.dx > 0.0 && velocity.dy < 0.0) {
            speed = -speed;
        }

        let angle = self
            .region_of(collision_point)
            .and_then(|region| PADDLE_REGION_ANGLES[region]);

        match angle {
            Some(angle) => {
                let v = Velocity::from_angle_and_speed(angle, speed);
                Velocity::new(v.dx, -v.dy.abs())
            }
            None => velocity.flip_dy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hitter() -> Hitter {
        Hitter {
            id: 1,
            color: Color::WHITE,
            position: Point::new(410.0, 550.0),
            radius: 5,
        }
    }

    /// Heading in degrees clockwise from straight up
    fn heading(v: Velocity) -> f64 {
        v.dx.atan2(-v.dy).to_degrees()
    }

    #[test]
    fn test_regions() {
        let paddle = Paddle::classic();
        assert_eq!(paddle.region_of(Point::new(400.0, 560.0)), Some(0));
        assert_eq!(paddle.region_of(Point::new(410.0, 560.0)), Some(0));
        assert_eq!(paddle.region_of(Point::new(416.0, 560.0)), Some(0));
        assert_eq!(paddle.region_of(Point::new(420.0, 560.0)), Some(1));
        assert_eq!(paddle.region_of(Point::new(440.0, 560.0)), Some(2));
        assert_eq!(paddle.region_of(Point::new(460.0, 560.0)), Some(3));
        assert_eq!(paddle.region_of(Point::new(480.0, 560.0)), Some(4));
        assert_eq!(paddle.region_of(Point::new(481.0, 560.0)), None);
        assert_eq!(paddle.region_of(Point::new(399.0, 560.0)), None);
    }

    #[test]
    fn test_left_region_sends_ball_up_left() {
        let paddle = Paddle::classic();
        let incoming = Velocity::new(3.0, 4.0);
        let v = paddle.hit(&hitter(), Point::new(410.0, 560.0), incoming);

        assert!((v.speed() - 5.0).abs() < 1e-9);
        assert!(v.dy < 0.0);
        assert!((heading(v) - -60.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_two_and_four() {
        let paddle = Paddle::classic();
        let incoming = Velocity::new(3.0, 4.0);

        let v = paddle.hit(&hitter(), Point::new(425.0, 560.0), incoming);
        assert!((heading(v) - -30.0).abs() < 1e-9);

        let v = paddle.hit(&hitter(), Point::new(455.0, 560.0), incoming);
        assert!((heading(v) - 30.0).abs() < 1e-9);

        let v = paddle.hit(&hitter(), Point::new(475.0, 560.0), incoming);
        assert!((heading(v) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_middle_region_reflects_dy() {
        let paddle = Paddle::classic();
        let v = paddle.hit(&hitter(), Point::new(440.0, 560.0), Velocity::new(2.0, 3.0));
        assert_eq!(v, Velocity::new(2.0, -3.0));
    }

    #[test]
    fn test_crossed_quadrant_negates_speed() {
        let paddle = Paddle::classic();
        let v = paddle.hit(&hitter(), Point::new(410.0, 560.0), Velocity::new(-3.0, 4.0));

        assert!((v.speed() - 5.0).abs() < 1e-9);
        assert!(v.dy < 0.0);
        assert!((heading(v) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_outside_paddle_reflects_dy() {
        let paddle = Paddle::classic();
        let v = paddle.hit(&hitter(), Point::new(300.0, 560.0), Velocity::new(2.0, 3.0));
        assert_eq!(v, Velocity::new(2.0, -3.0));
    }

    #[test]
    fn test_movement_wraps() {
        let mut paddle = Paddle::classic();
        paddle.move_right();
        assert_eq!(paddle.rect().left(), 405.0);
        paddle.move_left();
        assert_eq!(paddle.rect().left(), 400.0);

        let mut at_left = Paddle::new(
            AxisAlignedRectangle::new(Point::new(20.0, 560.0), 80.0, 20.0, PADDLE_COLOR),
            20.0,
            780.0,
            5.0,
        );
        at_left.move_left();
        assert_eq!(at_left.rect().left(), 695.0);

        let mut at_right = Paddle::new(
            AxisAlignedRectangle::new(Point::new(700.0, 560.0), 80.0, 20.0, PADDLE_COLOR),
            20.0,
            780.0,
            5.0,
        );
        at_right.move_right();
        assert_eq!(at_right.rect().left(), 25.0);
    }

    #[test]
    fn test_move_toward() {
        let mut paddle = Paddle::classic();
        paddle.move_toward(100.0);
        assert_eq!(paddle.rect().left(), 395.0);
        paddle.move_toward(437.0);
        assert_eq!(paddle.rect().left(), 395.0);
    }
}
