//! Rendering support
//!
//! The simulation exposes a read-only [`Snapshot`] each frame. Hosts either
//! draw it themselves or turn it into colored triangles with
//! [`build_vertices`].

pub mod shapes;
pub mod vertex;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Arena, GamePhase, Rect};

pub use shapes::{Palette, Style};
pub use vertex::Vertex;

/// Ball as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub ball: BallView,
    pub paddle: Rect,
    /// Standing bricks only
    pub bricks: Vec<Rect>,
}

impl<R> Arena<R> {
    /// Capture the renderable state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            ball: BallView {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                radius: self.ball.radius,
            },
            paddle: self.paddle.rect,
            bricks: self.bricks.active().map(|b| b.rect).collect(),
        }
    }
}

/// Triangle list for a frame: bricks, then ball, then paddle
pub fn build_vertices(snapshot: &Snapshot, palette: &Palette) -> Vec<Vertex> {
    let mut out = Vec::with_capacity((snapshot.bricks.len() + 1) * 12 + shapes::CIRCLE_SEGMENTS * 6);

    for brick in &snapshot.bricks {
        shapes::rect(&mut out, brick, &palette.brick);
    }
    let ball = &snapshot.ball;
    shapes::circle(&mut out, Vec2::new(ball.x, ball.y), ball.radius, &palette.ball);
    shapes::rect(&mut out, &snapshot.paddle, &palette.paddle);

    out
}
