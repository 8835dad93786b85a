//! Game state and core simulation types
//!
//! The [`Arena`] owns every piece of mutable round state. Nothing here is
//! global; hosts hold an `Arena` and feed it input and frame deltas.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::input::{Action, InputSource};
use crate::consts::{BRICK_PRESENCE, MAX_PENDING_EVENTS};
use crate::error::{ConfigError, positive};
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Round laid out, waiting for a start trigger
    Idle,
    /// Simulation advancing
    Playing,
    /// Ball fell past the bottom edge. Only observable inside `advance`.
    RoundOver,
}

/// Something notable that happened while advancing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    WallBounce,
    /// Paddle struck; `offset` is the signed impact offset from paddle center
    PaddleHit { offset: f32 },
    BrickDestroyed { row: u32, col: u32 },
    /// Last brick of the field destroyed. Play continues.
    FieldCleared,
    RoundOver { round: u32 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Launch speed (magnitude of the initial vertical velocity)
    pub speed: f32,
    /// Paddle-hit offset to horizontal velocity scale
    pub rebound_modifier: f32,
}

impl Ball {
    pub fn new(radius: f32, speed: f32, rebound_modifier: f32) -> Result<Self, ConfigError> {
        if !positive(radius) {
            return Err(ConfigError::InvalidBallRadius(radius));
        }
        if !positive(speed) {
            return Err(ConfigError::InvalidBallSpeed(speed));
        }
        Ok(Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
            rebound_modifier,
        })
    }

    /// Explicit Euler step
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Ball has fully left the arena through the bottom edge
    #[inline]
    pub fn is_lost(&self, arena_height: f32) -> bool {
        self.pos.y - self.radius > arena_height
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Keyboard movement speed (units/ms)
    pub speed: f32,
}

impl Paddle {
    pub fn new(width: f32, height: f32, speed: f32) -> Result<Self, ConfigError> {
        if !positive(width) || !positive(height) {
            return Err(ConfigError::InvalidPaddle { width, height });
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidPaddleSpeed(speed));
        }
        Ok(Self {
            rect: Rect::new(0.0, 0.0, width, height),
            speed,
        })
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.rect.origin()
    }

    /// Move under keyboard control. Both directions held cancel out.
    pub fn update<I: InputSource + ?Sized>(&mut self, dt: f32, input: &I, arena_width: f32) {
        if input.is_held(Action::MoveLeft) {
            self.rect.x -= self.speed * dt;
        }
        if input.is_held(Action::MoveRight) {
            self.rect.x += self.speed * dt;
        }
        self.clamp(arena_width);
    }

    /// Center the paddle on a pointer position
    pub fn set_position_from_pointer(&mut self, pointer_x: f32, arena_width: f32) {
        self.rect.x = pointer_x - self.rect.width / 2.0;
        self.clamp(arena_width);
    }

    /// Keep the paddle fully inside the arena
    pub fn clamp(&mut self, arena_width: f32) {
        self.rect.x = self.rect.x.min(arena_width - self.rect.width).max(0.0);
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub row: u32,
    pub col: u32,
    is_hit: bool,
}

impl Brick {
    pub fn new(rect: Rect, row: u32, col: u32) -> Self {
        Self {
            rect,
            row,
            col,
            is_hit: false,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// Destroy the brick. There is no way back within a round.
    #[inline]
    pub fn hit(&mut self) {
        self.is_hit = true;
    }
}

/// The grid of bricks for one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickField {
    rows: u32,
    cols: u32,
    /// Present bricks in row-major order
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Build a fresh grid, each cell independently present with p = 0.5
    ///
    /// Exactly `rows * cols` draws are taken from `rng`, in row-major order.
    pub fn generate<R: Rng>(
        rows: u32,
        cols: u32,
        arena_width: f32,
        brick_height: f32,
        rng: &mut R,
    ) -> Self {
        let brick_width = arena_width / cols as f32;
        let mut bricks = Vec::with_capacity((rows * cols) as usize);

        for row in 0..rows {
            for col in 0..cols {
                if rng.random_bool(BRICK_PRESENCE) {
                    let rect = Rect::new(
                        col as f32 * brick_width,
                        row as f32 * brick_height,
                        brick_width,
                        brick_height,
                    );
                    bricks.push(Brick::new(rect, row, col));
                }
            }
        }

        Self { rows, cols, bricks }
    }

    /// Field from explicit bricks (hand-built layouts)
    pub fn from_bricks(rows: u32, cols: u32, bricks: Vec<Brick>) -> Self {
        Self { rows, cols, bricks }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Every brick generated this round, destroyed ones included
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    /// Bricks still standing. Re-query each frame.
    pub fn active(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| !b.is_hit())
    }

    pub fn remaining(&self) -> usize {
        self.active().count()
    }

    pub fn is_cleared(&self) -> bool {
        self.active().next().is_none()
    }

    /// Row-major presence flags for the whole grid, as generated
    ///
    /// Bricks whose row or column lies outside the grid are not counted.
    pub fn presence(&self) -> Vec<bool> {
        let mut cells = vec![false; (self.rows * self.cols) as usize];
        for brick in &self.bricks {
            if brick.row >= self.rows || brick.col >= self.cols {
                continue;
            }
            cells[(brick.row * self.cols + brick.col) as usize] = true;
        }
        cells
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct Arena<R = Pcg32> {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickField,
    /// Rounds laid out so far (1-based)
    pub round: u32,
    tuning: Tuning,
    rng: R,
    events: Vec<GameEvent>,
}

impl Arena<Pcg32> {
    /// Create an arena with an entropy-seeded RNG
    pub fn new(width: f32, height: f32, tuning: Tuning) -> Result<Self, ConfigError> {
        let seed: u64 = rand::random();
        log::info!("Arena seeded with {}", seed);
        Self::with_seed(width, height, tuning, seed)
    }

    /// Create an arena whose brick layouts and launches replay from `seed`
    pub fn with_seed(
        width: f32,
        height: f32,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(width, height, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Arena<R> {
    /// Create an arena drawing all randomness from `rng`
    pub fn with_rng(width: f32, height: f32, tuning: Tuning, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        check_fits(width, height, &tuning)?;

        let ball = Ball::new(tuning.ball_radius, tuning.ball_speed, tuning.rebound_modifier)?;
        let paddle = Paddle::new(tuning.paddle_width, tuning.paddle_height, tuning.paddle_speed)?;

        let mut arena = Self {
            width,
            height,
            phase: GamePhase::Idle,
            ball,
            paddle,
            bricks: BrickField::from_bricks(tuning.brick_rows, tuning.brick_cols, Vec::new()),
            round: 0,
            tuning,
            rng,
            events: Vec::new(),
        };
        arena.new_round();
        Ok(arena)
    }

    /// Start the next round: new bricks, paddle centered, ball launched upward
    pub fn new_round(&mut self) {
        self.round += 1;
        self.layout();
        log::info!(
            "Round {} laid out: {} bricks, launch dx={:.3}",
            self.round,
            self.bricks.remaining(),
            self.ball.vel.x
        );
    }

    fn layout(&mut self) {
        let t = &self.tuning;
        self.bricks = BrickField::generate(
            t.brick_rows,
            t.brick_cols,
            self.width,
            t.brick_height,
            &mut self.rng,
        );

        self.paddle.rect.y = self.height - self.paddle.rect.height - t.paddle_bottom_margin;
        self.paddle.rect.x = (self.width - self.paddle.rect.width) / 2.0;

        let spread = t.launch_spread;
        self.ball.pos = Vec2::new(
            self.width / 2.0,
            self.paddle.rect.y - self.ball.radius - t.ball_spawn_gap,
        );
        self.ball.vel = Vec2::new(self.rng.random_range(-spread..=spread), -self.ball.speed);
        self.phase = GamePhase::Idle;
    }

    /// Idle -> Playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Playing;
            self.push_event(GameEvent::RoundStarted { round: self.round });
            log::info!("Round {} started", self.round);
        }
    }

    /// Pointer button pressed anywhere on the surface
    pub fn pointer_pressed(&mut self) {
        self.start();
    }

    /// Pointer moved to `x` (surface coordinates). Drives the paddle while playing.
    pub fn pointer_moved(&mut self, x: f32) {
        if self.phase == GamePhase::Playing {
            self.paddle.set_position_from_pointer(x, self.width);
        }
    }

    /// Adopt new surface dimensions. Only allowed between rounds.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        if self.phase == GamePhase::Playing {
            log::warn!("Ignoring resize to {}x{} during play", width, height);
            return Err(ConfigError::ResizeWhilePlaying);
        }
        check_fits(width, height, &self.tuning)?;
        self.width = width;
        self.height = height;
        self.layout();
        Ok(())
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Events since the last drain
    ///
    /// Hosts are expected to call [`Arena::drain_events`] every frame. Past
    /// `MAX_PENDING_EVENTS` the oldest half of the backlog is discarded.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.events.len() / 2;
            log::warn!("{} undrained events, discarding the oldest {}", self.events.len(), dropped);
            self.events.drain(..dropped);
        }
        self.events.push(event);
    }
}

/// Arena must hold the paddle and a spawned ball below the ceiling
fn check_fits(width: f32, height: f32, tuning: &Tuning) -> Result<(), ConfigError> {
    let min_height = tuning.paddle_height
        + tuning.paddle_bottom_margin
        + tuning.ball_spawn_gap
        + tuning.ball_radius * 2.0;
    if !positive(width) || !positive(height) || height < min_height {
        return Err(ConfigError::InvalidArena { width, height });
    }
    if tuning.paddle_width > width {
        return Err(ConfigError::PaddleTooWide {
            paddle: tuning.paddle_width,
            arena: width,
        });
    }
    if tuning.ball_radius * 2.0 > width {
        return Err(ConfigError::InvalidBallRadius(tuning.ball_radius));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(seed: u64) -> Arena {
        Arena::with_seed(400.0, 600.0, Tuning::default(), seed).unwrap()
    }

    #[test]
    fn test_new_arena_layout() {
        let arena = arena(7);
        assert_eq!(arena.phase, GamePhase::Idle);
        assert_eq!(arena.round, 1);

        // Paddle centered, 10 above the bottom
        assert_eq!(arena.paddle.rect.x, 164.0);
        assert_eq!(arena.paddle.rect.y, 575.0);

        // Ball centered, 5 above the paddle, launched upward
        assert_eq!(arena.ball.pos, Vec2::new(200.0, 564.0));
        assert_eq!(arena.ball.vel.y, -0.3);
        assert!((-0.5..=0.5).contains(&arena.ball.vel.x));
    }

    #[test]
    fn test_generate_grid_geometry() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = BrickField::generate(7, 9, 450.0, 20.0, &mut rng);

        assert_eq!(field.presence().len(), 63);
        for brick in field.bricks() {
            assert_eq!(brick.rect.width, 50.0);
            assert_eq!(brick.rect.height, 20.0);
            assert_eq!(brick.rect.x, brick.col as f32 * 50.0);
            assert_eq!(brick.rect.y, brick.row as f32 * 20.0);
            assert!(!brick.is_hit());
        }
        assert_eq!(
            field.presence().iter().filter(|p| **p).count(),
            field.bricks().len()
        );
    }

    #[test]
    fn test_active_reflects_hits() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = BrickField::generate(7, 9, 400.0, 20.0, &mut rng);
        let before = field.remaining();
        assert!(before > 0);

        field.bricks_mut()[0].hit();
        assert_eq!(field.remaining(), before - 1);
        assert!(field.active().all(|b| !b.is_hit()));
        // Destroyed bricks still occupy their grid cell
        assert_eq!(field.presence().iter().filter(|p| **p).count(), before);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::new(72.0, 15.0, 0.7).unwrap();
        paddle.set_position_from_pointer(10.0, 400.0);
        assert_eq!(paddle.rect.x, 0.0);

        paddle.set_position_from_pointer(395.0, 400.0);
        assert_eq!(paddle.rect.x, 328.0);

        paddle.set_position_from_pointer(200.0, 400.0);
        assert_eq!(paddle.rect.x, 164.0);
    }

    #[test]
    fn test_paddle_keyboard_update() {
        use crate::sim::TickInput;

        let mut paddle = Paddle::new(72.0, 15.0, 0.7).unwrap();
        paddle.rect.x = 164.0;

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        paddle.update(10.0, &left, 400.0);
        assert!((paddle.rect.x - 157.0).abs() < 1e-4);

        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        paddle.update(10.0, &both, 400.0);
        assert!((paddle.rect.x - 157.0).abs() < 1e-4);

        // A long frame runs into the left wall
        paddle.update(1000.0, &left, 400.0);
        assert_eq!(paddle.rect.x, 0.0);
    }

    #[test]
    fn test_construction_rejects_bad_parameters() {
        assert!(matches!(
            Ball::new(-6.0, 0.3, 1.65),
            Err(ConfigError::InvalidBallRadius(_))
        ));
        assert!(matches!(
            Ball::new(6.0, 0.0, 1.65),
            Err(ConfigError::InvalidBallSpeed(_))
        ));
        assert!(matches!(
            Arena::with_seed(0.0, 600.0, Tuning::default(), 1),
            Err(ConfigError::InvalidArena { .. })
        ));
        assert!(matches!(
            Arena::with_seed(50.0, 600.0, Tuning::default(), 1),
            Err(ConfigError::PaddleTooWide { .. })
        ));
        assert!(matches!(
            Paddle::new(72.0, 15.0, -0.7),
            Err(ConfigError::InvalidPaddleSpeed(_))
        ));
        assert!(matches!(
            Paddle::new(72.0, 15.0, f32::NAN),
            Err(ConfigError::InvalidPaddleSpeed(_))
        ));
        assert!(Paddle::new(72.0, 15.0, 0.0).is_ok());
    }

    #[test]
    fn test_arena_too_short_for_spawned_ball() {
        // Paddle 15 + margin 10 + gap 5 + ball diameter 12
        assert!(matches!(
            Arena::with_seed(400.0, 30.0, Tuning::default(), 3),
            Err(ConfigError::InvalidArena { .. })
        ));
        assert!(matches!(
            Arena::with_seed(400.0, 41.0, Tuning::default(), 3),
            Err(ConfigError::InvalidArena { .. })
        ));

        let arena = Arena::with_seed(400.0, 42.0, Tuning::default(), 3).unwrap();
        assert_eq!(arena.ball.pos.y, arena.ball.radius);

        let mut arena = arena;
        assert!(matches!(
            arena.resize(400.0, 30.0),
            Err(ConfigError::InvalidArena { .. })
        ));
        assert_eq!(arena.height, 42.0);
    }

    #[test]
    fn test_presence_skips_bricks_outside_grid() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        let field = BrickField::from_bricks(
            1,
            2,
            vec![Brick::new(rect, 0, 1), Brick::new(rect, 0, 3), Brick::new(rect, 4, 0)],
        );
        assert_eq!(field.presence(), vec![false, true]);
        assert_eq!(field.remaining(), 3);
    }

    #[test]
    fn test_undrained_events_are_bounded() {
        let mut arena = arena(13);
        for _ in 0..MAX_PENDING_EVENTS * 3 {
            arena.push_event(GameEvent::WallBounce);
        }
        arena.push_event(GameEvent::FieldCleared);
        assert!(arena.events().len() <= MAX_PENDING_EVENTS);
        assert_eq!(arena.events().last(), Some(&GameEvent::FieldCleared));

        arena.drain_events();
        assert!(arena.events().is_empty());
    }

    #[test]
    fn test_pointer_moves_paddle_only_while_playing() {
        let mut arena = arena(5);
        arena.pointer_moved(50.0);
        assert_eq!(arena.paddle.rect.x, 164.0);

        arena.pointer_pressed();
        assert!(arena.is_playing());
        assert_eq!(
            arena.drain_events(),
            vec![GameEvent::RoundStarted { round: 1 }]
        );

        arena.pointer_moved(50.0);
        assert_eq!(arena.paddle.rect.x, 14.0);
    }

    #[test]
    fn test_resize_between_rounds_only() {
        let mut arena = arena(9);
        arena.resize(900.0, 700.0).unwrap();
        assert_eq!(arena.round, 1);
        assert_eq!(arena.paddle.rect.y, 700.0 - 15.0 - 10.0);
        assert!(arena.bricks.bricks().iter().all(|b| b.rect.width == 100.0));

        arena.start();
        assert!(matches!(
            arena.resize(400.0, 600.0),
            Err(ConfigError::ResizeWhilePlaying)
        ));
        assert_eq!(arena.width, 900.0);
    }
}
