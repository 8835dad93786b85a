//! Data-driven game balance
//!
//! Every constant the simulation reads comes through [`Tuning`]. Defaults
//! reproduce the classic feel; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, positive};

/// Key codes bound to each logical action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub start: Vec<String>,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_left: vec!["ArrowLeft".to_string()],
            move_right: vec!["ArrowRight".to_string()],
            start: vec!["Enter".to_string()],
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_radius: f32,
    /// Initial vertical speed (units/ms)
    pub ball_speed: f32,
    pub rebound_modifier: f32,
    pub launch_spread: f32,
    pub ball_spawn_gap: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Keyboard movement speed (units/ms)
    pub paddle_speed: f32,
    pub paddle_bottom_margin: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,

    // === Timing ===
    /// Upper bound on a single frame delta (ms)
    pub max_frame_delta: f32,

    pub controls: Controls,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            rebound_modifier: REBOUND_MODIFIER,
            launch_spread: LAUNCH_SPREAD,
            ball_spawn_gap: BALL_SPAWN_GAP,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_height: BRICK_HEIGHT,

            max_frame_delta: MAX_FRAME_DELTA,

            controls: Controls::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would corrupt the physics
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive(self.ball_radius) {
            return Err(ConfigError::InvalidBallRadius(self.ball_radius));
        }
        if !positive(self.ball_speed) {
            return Err(ConfigError::InvalidBallSpeed(self.ball_speed));
        }
        if !positive(self.paddle_width) || !positive(self.paddle_height) {
            return Err(ConfigError::InvalidPaddle {
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if self.brick_rows == 0 || self.brick_cols == 0 || !positive(self.brick_height) {
            return Err(ConfigError::InvalidGrid {
                rows: self.brick_rows,
                cols: self.brick_cols,
                brick_height: self.brick_height,
            });
        }

        let non_negative = [
            ("rebound_modifier", self.rebound_modifier),
            ("launch_spread", self.launch_spread),
            ("ball_spawn_gap", self.ball_spawn_gap),
            ("paddle_speed", self.paddle_speed),
            ("paddle_bottom_margin", self.paddle_bottom_margin),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }

        Ok(())
    }
}
