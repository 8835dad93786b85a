//! Input seen by the simulation
//!
//! The simulation never looks at raw devices. It asks an [`InputSource`]
//! whether a logical action is held, once per frame.

use serde::{Deserialize, Serialize};

/// Logical actions the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    /// Begin play while idle
    Start,
}

/// Pressed-state lookup, treated as stable for the duration of a frame
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub start: bool,
}

impl TickInput {
    /// Capture the current state of any input source
    pub fn sample<I: InputSource + ?Sized>(source: &I) -> Self {
        Self {
            move_left: source.is_held(Action::MoveLeft),
            move_right: source.is_held(Action::MoveRight),
            start: source.is_held(Action::Start),
        }
    }
}

impl InputSource for TickInput {
    fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Start => self.start,
        }
    }
}
