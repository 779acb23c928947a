//! Geometry types shared by the resolvers and the renderer

use crate::model::{AnchorPoint, ANCHOR_GRID};

/// A 2D point in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset the point by the given deltas
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The point at `anchor`, as fractions of this rectangle's size
    pub fn anchor_point(&self, anchor: AnchorPoint) -> Point {
        Point::new(
            self.x + self.width * anchor.x.fraction(),
            self.y + self.height * anchor.y.fraction(),
        )
    }

    /// The nine anchor points, row-major
    pub fn anchor_grid(&self) -> [Point; 9] {
        ANCHOR_GRID.map(|anchor| self.anchor_point(anchor))
    }

    /// Shrink by `amount` on every side; size never goes negative
    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Place a box of the given size so its `own` anchor sits on `target`
    pub fn pinned(target: Point, width: f64, height: f64, own: AnchorPoint) -> Rect {
        Rect::new(
            target.x - width * own.x.fraction(),
            target.y - height * own.y.fraction(),
            width,
            height,
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}
