//! Breakout headless runner
//!
//! Drives an arena with a simulated 60 Hz frame scheduler and an autopilot
//! that works the keyboard, logging round events as they happen.
//!
//! Usage: `breakout [FRAMES] [SEED]`. Set `BREAKOUT_TUNING` to a JSON file to
//! override tuning, and `RUST_LOG=debug` to see individual hits.

use std::error::Error;

use breakout::platform::{FrameClock, KeyState};
use breakout::renderer::{Palette, build_vertices};
use breakout::sim::{Arena, GameEvent, GamePhase};
use breakout::{Controls, Tuning};

/// Nominal frame interval of the simulated scheduler (ms)
const FRAME_INTERVAL: f64 = 1000.0 / 60.0;
/// Paddle center may trail the ball by this much before the autopilot moves
const AUTOPILOT_DEADZONE: f32 = 8.0;

#[derive(Debug, Default)]
struct Stats {
    rounds_lost: u32,
    bricks: u32,
    paddle_hits: u32,
    fields_cleared: u32,
}

impl Stats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoundStarted { round } => log::info!("Round {} started", round),
            GameEvent::RoundOver { round } => {
                self.rounds_lost += 1;
                log::info!("Round {} lost", round);
            }
            GameEvent::BrickDestroyed { .. } => self.bricks += 1,
            GameEvent::PaddleHit { .. } => self.paddle_hits += 1,
            GameEvent::FieldCleared => self.fields_cleared += 1,
            GameEvent::WallBounce => {}
        }
    }
}

fn set_key(keys: &mut KeyState, codes: &[String], down: bool) {
    if let Some(code) = codes.first() {
        if down {
            keys.key_down(code);
        } else {
            keys.key_up(code);
        }
    }
}

/// Press the keys a player chasing the ball would press
fn autopilot<R>(arena: &Arena<R>, controls: &Controls, keys: &mut KeyState) {
    let offset = arena.ball.pos.x - arena.paddle.origin().x;

    set_key(keys, &controls.move_left, offset < -AUTOPILOT_DEADZONE);
    set_key(keys, &controls.move_right, offset > AUTOPILOT_DEADZONE);
    set_key(keys, &controls.start, arena.phase == GamePhase::Idle);
}

fn load_tuning() -> Result<Tuning, Box<dyn Error>> {
    match std::env::var("BREAKOUT_TUNING") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded tuning from {}", path);
            Ok(Tuning::from_json(&json)?)
        }
        Err(_) => Ok(Tuning::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3600);
    let seed: Option<u64> = args.next().map(|s| s.parse()).transpose()?;

    let tuning = load_tuning()?;
    let controls = tuning.controls.clone();
    let mut clock = FrameClock::new(tuning.max_frame_delta);
    let mut arena = match seed {
        Some(seed) => {
            log::info!("Arena seeded with {}", seed);
            Arena::with_seed(400.0, 600.0, tuning, seed)?
        }
        None => Arena::new(400.0, 600.0, tuning)?,
    };

    let mut keys = KeyState::new();
    let mut stats = Stats::default();
    let palette = Palette::default();
    let mut vertex_count = 0;
    let mut now = 0.0;

    for frame in 0..frames {
        // Alternate slightly long and short frames like a real display
        let jitter = if frame % 2 == 0 { 0.9 } else { 1.1 };
        now += FRAME_INTERVAL * jitter;
        let dt = clock.tick(now);

        autopilot(&arena, &controls, &mut keys);
        arena.advance(dt, &keys.bind(&controls));

        for event in arena.drain_events() {
            stats.record(&event);
        }

        vertex_count = build_vertices(&arena.snapshot(), &palette).len();
    }

    log::info!(
        "{} frames: {} rounds lost, {} bricks, {} paddle hits, {} fields cleared",
        frames,
        stats.rounds_lost,
        stats.bricks,
        stats.paddle_hits,
        stats.fields_cleared
    );
    log::debug!(
        "Final frame ({} vertices): {}",
        vertex_count,
        serde_json::to_string(&arena.snapshot())?
    );

    Ok(())
}
