//! Axis-aligned rectangle geometry
//!
//! A rectangle is defined by its top-left corner and its extent, in screen
//! orientation (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Center point
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if `x` lies within the horizontal span (edges inclusive)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.right()
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Point on or inside `rect` nearest to `center`
///
/// Each axis is clamped independently, so a center inside the rectangle maps
/// to itself.
#[inline]
pub fn closest_point_on_rect(center: Vec2, rect: &Rect) -> Vec2 {
    center.clamp(rect.min(), rect.max())
}

/// Circle vs rectangle overlap. Touching is not overlapping.
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    distance(center, closest_point_on_rect(center, rect)) < radius
}
