//! Axis-Aligned Bounding Boxes
//!
//! Screen coordinates: x grows rightward, y grows downward. The ground line
//! is a fixed y value and "higher" means a smaller y.

use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Left edge
    pub left: f32,
    /// Top edge (smaller y is higher on screen)
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Aabb {
    /// Create from left/top corner and size.
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Create a box whose bottom edge sits at `bottom`.
    #[inline]
    pub fn resting_on(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::new(left, bottom - height, width, height)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict overlap test. Touching edges do not count; any nonzero
    /// intersection does.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}
