//! Per-frame simulation step
//!
//! Order within a frame: start trigger, paddle, ball integration, walls,
//! paddle bounce, bricks, loss check.

use rand::Rng;

use super::input::{Action, InputSource};
use super::state::{Arena, GameEvent, GamePhase};

impl<R: Rng> Arena<R> {
    /// Advance the round by `dt` milliseconds
    ///
    /// Does nothing but watch for the start action unless the round is
    /// playing. A ball lost past the bottom edge ends the round and lays out
    /// the next one within the same call, leaving the arena idle.
    pub fn advance<I: InputSource + ?Sized>(&mut self, dt: f32, input: &I) {
        if self.phase == GamePhase::Idle && input.is_held(Action::Start) {
            self.start();
        }
        if self.phase != GamePhase::Playing {
            return;
        }

        self.paddle.update(dt, input, self.width);

        self.ball.integrate(dt);

        if self.ball.resolve_arena_boundaries(self.width).any() {
            self.push_event(GameEvent::WallBounce);
        }

        if self.ball.resolve_paddle_collision(&self.paddle, dt) {
            let offset = self.ball.pos.x - self.paddle.origin().x;
            log::debug!("Paddle hit at offset {:.1}, dx={:.3}", offset, self.ball.vel.x);
            self.push_event(GameEvent::PaddleHit { offset });
        }

        let contact = self.ball.resolve_brick_collisions(self.bricks.bricks_mut());
        for &index in &contact.destroyed {
            let brick = &self.bricks.bricks()[index];
            let (row, col) = (brick.row, brick.col);
            log::debug!("Brick ({}, {}) destroyed", row, col);
            self.push_event(GameEvent::BrickDestroyed { row, col });
        }
        if !contact.destroyed.is_empty() && self.bricks.is_cleared() {
            log::info!("Round {}: field cleared", self.round);
            self.push_event(GameEvent::FieldCleared);
        }

        if self.ball.is_lost(self.height) {
            self.phase = GamePhase::RoundOver;
            log::info!("Round {} over", self.round);
            self.push_event(GameEvent::RoundOver { round: self.round });
            self.new_round();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::sim::{Brick, BrickField, Rect, TickInput};
    use crate::tuning::Tuning;

    use super::*;

    fn playing_arena(seed: u64) -> Arena {
        let mut arena = Arena::with_seed(400.0, 600.0, Tuning::default(), seed).unwrap();
        arena.bricks = BrickField::from_bricks(7, 9, Vec::new());
        arena.start();
        arena.drain_events();
        arena
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut arena = Arena::with_seed(400.0, 600.0, Tuning::default(), 1).unwrap();
        let before = arena.ball.pos;
        arena.advance(16.0, &TickInput::default());
        assert_eq!(arena.phase, GamePhase::Idle);
        assert_eq!(arena.ball.pos, before);
    }

    #[test]
    fn test_start_key_begins_play_same_frame() {
        let mut arena = Arena::with_seed(400.0, 600.0, Tuning::default(), 1).unwrap();
        let before = arena.ball.pos;
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        arena.advance(10.0, &input);
        assert_eq!(arena.phase, GamePhase::Playing);
        assert_eq!(arena.ball.pos.y, before.y - 3.0);
        assert_eq!(arena.events()[0], GameEvent::RoundStarted { round: 1 });
    }

    #[test]
    fn test_zero_delta_is_idempotent() {
        let mut arena = playing_arena(2);
        let (ball, paddle) = (arena.ball.pos, arena.paddle.rect);
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            arena.advance(0.0, &input);
        }
        assert_eq!(arena.ball.pos, ball);
        assert_eq!(arena.paddle.rect, paddle);
    }

    #[test]
    fn test_paddle_bounce_emits_event() {
        let mut arena = playing_arena(3);
        arena.ball.pos = Vec2::new(220.0, 568.0);
        arena.ball.vel = Vec2::new(0.0, 0.3);

        arena.advance(10.0, &TickInput::default());
        assert!(arena.ball.vel.y < 0.0);
        assert!(arena.ball.vel.x > 0.0);
        assert_eq!(arena.ball.pos.y, 569.0);
        assert!(matches!(
            arena.events(),
            [GameEvent::PaddleHit { offset }] if *offset == 20.0
        ));
    }

    #[test]
    fn test_brick_hit_and_field_cleared() {
        let mut arena = playing_arena(4);
        arena.bricks = BrickField::from_bricks(
            7,
            9,
            vec![Brick::new(Rect::new(0.0, 0.0, 40.0, 20.0), 0, 0)],
        );
        arena.ball.pos = Vec2::new(20.0, 29.0);
        arena.ball.vel = Vec2::new(0.0, -0.4);

        arena.advance(10.0, &TickInput::default());
        assert_eq!(arena.ball.pos.y, 26.0);
        assert_eq!(arena.ball.vel.y, 0.4);
        assert_eq!(
            arena.events(),
            &[
                GameEvent::BrickDestroyed { row: 0, col: 0 },
                GameEvent::FieldCleared
            ]
        );
    }

    #[test]
    fn test_loss_resets_round_to_idle() {
        let mut arena = playing_arena(5);
        arena.ball.pos = Vec2::new(20.0, 600.0);
        arena.ball.vel = Vec2::new(0.0, 0.3);

        arena.advance(30.0, &TickInput::default());
        assert_eq!(arena.phase, GamePhase::Idle);
        assert_eq!(arena.round, 2);
        assert_eq!(arena.ball.pos, Vec2::new(200.0, 564.0));
        assert_eq!(arena.ball.vel.y, -0.3);
        assert_eq!(arena.paddle.rect.x, 164.0);
        assert!(arena.events().contains(&GameEvent::RoundOver { round: 1 }));

        // Idle again: nothing moves without a new start
        let before = arena.ball.pos;
        arena.advance(16.0, &TickInput::default());
        assert_eq!(arena.ball.pos, before);
    }
}
