//! Axis-aligned rectangle and its color tag

use serde::{Deserialize, Serialize};

use super::{Point, Segment};

/// RGB tag carried by rectangles and balls
///
/// The engine never draws; the color is only compared (hit notification is
/// suppressed when a ball already carries its obstacle's color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Side of a rectangle, in the order boundary segments are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Right,
    Left,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Right, Side::Left, Side::Top, Side::Bottom];
}

/// Bounding box with its upper-left corner at `upper_left`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedRectangle {
    pub upper_left: Point,
    width: f64,
    height: f64,
    pub color: Color,
}

impl AxisAlignedRectangle {
    /// Negative dimensions are clamped to zero
    pub fn new(upper_left: Point, width: f64, height: f64, color: Color) -> Self {
        Self {
            upper_left,
            width: width.max(0.0),
            height: height.max(0.0),
            color,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.upper_left.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.upper_left.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.upper_left.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.upper_left.y + self.height
    }

    /// Zero width or height: the rectangle has no interior
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Same rectangle moved so its upper-left corner is at `upper_left`
    pub fn moved_to(&self, upper_left: Point) -> Self {
        Self { upper_left, ..*self }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn side(&self, side: Side) -> Segment {
        let (l, r, t, b) = (self.left(), self.right(), self.top(), self.bottom());
        match side {
            Side::Right => Segment::from_coords(r, t, r, b),
            Side::Left => Segment::from_coords(l, t, l, b),
            Side::Top => Segment::from_coords(l, t, r, t),
            Side::Bottom => Segment::from_coords(l, b, r, b),
        }
    }

    /// The four sides: right, left, top, bottom
    pub fn boundary_segments(&self) -> [Segment; 4] {
        Side::ALL.map(|side| self.side(side))
    }

    /// Every point where `segment` meets the rectangle's sides
    ///
    /// Points come out in side order. A corner hit is reported once even
    /// though two sides meet there.
    pub fn intersection_points(&self, segment: &Segment) -> Vec<Point> {
        if self.is_degenerate() {
            return Vec::new();
        }

        let mut points: Vec<Point> = Vec::with_capacity(4);
        for side in self.boundary_segments() {
            if let Some(p) = segment.intersection_point(&side) {
                if !points.contains(&p) {
                    points.push(p);
                }
            }
        }
        points
    }
}
