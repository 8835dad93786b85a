//! Shape generation for 2D primitives
//!
//! Every shape is a filled body with an outline stroke centered on its edge,
//! emitted as a triangle list: outline first, fill on top.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 24;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Fill and outline for one kind of object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: [f32; 4],
    pub outline: [f32; 4],
    pub outline_width: f32,
}

impl Style {
    pub const fn new(fill: [f32; 4]) -> Self {
        Self {
            fill,
            outline: BLACK,
            outline_width: 1.0,
        }
    }
}

/// Styles for everything drawn in a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub ball: Style,
    pub paddle: Style,
    pub brick: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ball: Style::new(WHITE),
            paddle: Style::new(WHITE),
            brick: Style::new(YELLOW),
        }
    }
}

fn quad(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    if max.x <= min.x || max.y <= min.y {
        return;
    }
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
    out.push(Vertex::new(min.x, max.y, color));
}

fn disc(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4]) {
    if radius <= 0.0 {
        return;
    }
    for i in 0..CIRCLE_SEGMENTS {
        let a1 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let a2 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
        let p2 = center + Vec2::new(a2.cos(), a2.sin()) * radius;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(p1.x, p1.y, color));
        out.push(Vertex::new(p2.x, p2.y, color));
    }
}

/// Outlined rectangle
pub fn rect(out: &mut Vec<Vertex>, rect: &Rect, style: &Style) {
    let half = Vec2::splat(style.outline_width / 2.0);
    if style.outline_width > 0.0 {
        quad(out, rect.min() - half, rect.max() + half, style.outline);
    }
    quad(out, rect.min() + half, rect.max() - half, style.fill);
}

/// Outlined circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, style: &Style) {
    let half = style.outline_width / 2.0;
    if style.outline_width > 0.0 {
        disc(out, center, radius + half, style.outline);
    }
    disc(out, center, radius - half, style.fill);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_emits_outline_then_fill() {
        let mut out = Vec::new();
        rect(&mut out, &Rect::new(0.0, 0.0, 40.0, 20.0), &Style::new(YELLOW));
        assert_eq!(out.len(), 12);
        assert_eq!(out[0].color, BLACK);
        assert_eq!(out[0].position, [-0.5, -0.5]);
        assert_eq!(out[6].color, YELLOW);
        assert_eq!(out[6].position, [0.5, 0.5]);
    }

    #[test]
    fn test_circle_without_outline() {
        let style = Style {
            outline_width: 0.0,
            ..Style::new(WHITE)
        };
        let mut out = Vec::new();
        circle(&mut out, Vec2::new(10.0, 10.0), 6.0, &style);
        assert_eq!(out.len(), CIRCLE_SEGMENTS * 3);
        assert!(out.iter().all(|v| v.color == WHITE));
    }

    #[test]
    fn test_degenerate_fill_is_skipped() {
        let mut out = Vec::new();
        rect(&mut out, &Rect::new(0.0, 0.0, 0.5, 0.5), &Style::new(WHITE));
        // Outline only; the fill collapses to nothing
        assert_eq!(out.len(), 6);
    }
}
