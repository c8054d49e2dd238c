//! Axis-aligned bounding boxes shared by every collidable entity.

use embedded_graphics::prelude::Point;

/// Axis-aligned rectangle in screen units, `(x, y)` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The box pulled inward by `buffer` on every side.
    pub fn shrink(&self, buffer: f32) -> Self {
        Self::new(
            self.x + buffer,
            self.y + buffer,
            self.width - 2.0 * buffer,
            self.height - 2.0 * buffer,
        )
    }

    /// Strict overlap on both axes. Boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap after shrinking both boxes by `buffer`.
    pub fn overlaps_with_buffer(&self, other: &Self, buffer: f32) -> bool {
        self.shrink(buffer).overlaps(&other.shrink(buffer))
    }

    /// A box of this size centered on `other`.
    pub fn centered_on(&self, other: &Self) -> Self {
        Self::new(
            other.x + (other.width - self.width) / 2.0,
            other.y + (other.height - self.height) / 2.0,
            self.width,
            self.height,
        )
    }

    /// Pixel position of the top-left corner (truncated toward zero).
    pub fn top_left(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}
