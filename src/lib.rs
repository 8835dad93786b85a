//! Breakout - A ball, a paddle and a field of bricks
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, round state)
//! - `renderer`: Read-only render snapshot and CPU vertex generation
//! - `platform`: Host adapters (key state, frame timing)
//! - `tuning`: Data-driven game balance
//! - `error`: Construction-time errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{Controls, Tuning};

/// Game configuration constants
///
/// Velocities are in arena units per millisecond, matching the host's
/// millisecond frame timestamps.
pub mod consts {
    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_SPEED: f32 = 0.3;
    /// Scales paddle-relative impact offset into post-bounce horizontal velocity
    pub const REBOUND_MODIFIER: f32 = 1.65;
    /// Horizontal launch velocity is drawn from [-LAUNCH_SPREAD, LAUNCH_SPREAD]
    pub const LAUNCH_SPREAD: f32 = 0.5;
    /// Vertical gap between paddle top and ball bottom at round start
    pub const BALL_SPAWN_GAP: f32 = 5.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 72.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 0.7;
    /// Distance between paddle bottom and arena bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: u32 = 7;
    pub const BRICK_COLS: u32 = 9;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Probability that a grid cell holds a brick
    pub const BRICK_PRESENCE: f64 = 0.5;

    /// Longest frame delta the frame clock hands to the simulation (ms)
    pub const MAX_FRAME_DELTA: f32 = 100.0;
    /// Undrained events kept by an arena before the oldest are discarded
    pub const MAX_PENDING_EVENTS: usize = 1024;
}
