//! Construction-time errors
//!
//! The simulation itself has no failure modes. Everything that can go wrong
//! is a bad parameter handed to a constructor, and is rejected up front.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid arena size: {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("Invalid ball radius: {0}")]
    InvalidBallRadius(f32),

    #[error("Invalid ball speed: {0}")]
    InvalidBallSpeed(f32),

    #[error("Invalid paddle size: {width}x{height}")]
    InvalidPaddle { width: f32, height: f32 },

    #[error("Invalid paddle speed: {0}")]
    InvalidPaddleSpeed(f32),

    #[error("Paddle width {paddle} does not fit arena width {arena}")]
    PaddleTooWide { paddle: f32, arena: f32 },

    #[error("Invalid brick grid: {rows}x{cols}, brick height {brick_height}")]
    InvalidGrid {
        rows: u32,
        cols: u32,
        brick_height: f32,
    },

    #[error("Tuning value `{field}` must be finite and non-negative, got {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    #[error("Cannot resize the arena while a round is being played")]
    ResizeWhilePlaying,

    #[error("Tuning parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ensure a dimension is finite and strictly positive
pub(crate) fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
