//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time arrives as a delta per call
//! - Input arrives through [`InputSource`]
//! - Randomness arrives through an injected RNG

pub mod collision;
pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{BrickContact, WallContact};
pub use geometry::{Rect, circle_intersects_rect, closest_point_on_rect, distance};
pub use input::{Action, InputSource, TickInput};
pub use state::{Arena, Ball, Brick, BrickField, GameEvent, GamePhase, Paddle};
