//! Platform abstraction layer
//!
//! Host-side adapters between raw device/timer events and the simulation:
//! - Input: key code pressed-state table and action bindings
//! - Time: frame timestamps to per-frame deltas

pub mod input;
pub mod time;

pub use input::{BoundKeys, KeyState};
pub use time::FrameClock;
