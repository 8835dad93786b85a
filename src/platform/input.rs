//! Keyboard state tracking
//!
//! Hosts forward raw key down/up events (by key code, e.g. `"ArrowLeft"`)
//! into a [`KeyState`]. The simulation reads it through [`BoundKeys`], which
//! maps logical actions onto key codes using [`Controls`].

use std::collections::HashMap;

use crate::sim::{Action, InputSource};
use crate::tuning::Controls;

/// Pressed state per key code
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.held.insert(code.to_string(), true);
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.insert(code.to_string(), false);
    }

    /// Keys never seen are not held
    pub fn is_down(&self, code: &str) -> bool {
        self.held.get(code).copied().unwrap_or(false)
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Pair with bindings to form an [`InputSource`]
    pub fn bind<'a>(&'a self, controls: &'a Controls) -> BoundKeys<'a> {
        BoundKeys {
            keys: self,
            controls,
        }
    }
}

/// A key table viewed through action bindings
#[derive(Debug, Clone, Copy)]
pub struct BoundKeys<'a> {
    keys: &'a KeyState,
    controls: &'a Controls,
}

impl InputSource for BoundKeys<'_> {
    fn is_held(&self, action: Action) -> bool {
        let codes = match action {
            Action::MoveLeft => &self.controls.move_left,
            Action::MoveRight => &self.controls.move_right,
            Action::Start => &self.controls.start,
        };
        codes.iter().any(|code| self.keys.is_down(code))
    }
}
