//! Axis-aligned rectangle primitive
//!
//! All world geometry is expressed as boxes in pixel units with the origin at
//! the top-left corner and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box `{x, y, w, h}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square box of side `size` at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}
