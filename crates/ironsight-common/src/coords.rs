//! Screen-space coordinate helpers.
//!
//! Screen coordinates follow the usual 2D convention: origin at the top-left,
//! x grows right, y grows down, units are logical pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the viewport has a non-zero area.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height, or 1.0 for a degenerate viewport.
    #[must_use]
    pub fn aspect(self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Whether a point lies in `[0, width] x [0, height]` (edges included).
    #[must_use]
    pub fn contains(self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.x <= self.width as f32
            && point.y >= 0.0
            && point.y <= self.height as f32
    }

    /// Center of the viewport.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(796, 448)
    }
}

/// Integer rectangle in sprite or screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
