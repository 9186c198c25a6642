//! Held-action input capability
//!
//! The host owns raw key capture. The sim only asks "is this action held?"
//! once per tick and works from the resulting [`TickInput`] snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Thrust,
    Reverse,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::RotateLeft,
        Action::RotateRight,
        Action::Thrust,
        Action::Reverse,
        Action::Fire,
    ];

    /// Default binding from a DOM-style key code
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::RotateLeft),
            "ArrowRight" | "KeyD" => Some(Action::RotateRight),
            "ArrowUp" | "KeyW" => Some(Action::Thrust),
            "ArrowDown" | "KeyS" => Some(Action::Reverse),
            "Space" => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Anything that can answer whether a logical action is currently held
pub trait InputSource {
    fn is_action_held(&self, action: Action) -> bool;
}

/// Input state for a single tick (polled once, then read-only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub reverse: bool,
    pub fire: bool,
}

impl TickInput {
    /// Snapshot every action from an input source
    pub fn poll<I: InputSource + ?Sized>(source: &I) -> Self {
        Self {
            rotate_left: source.is_action_held(Action::RotateLeft),
            rotate_right: source.is_action_held(Action::RotateRight),
            thrust: source.is_action_held(Action::Thrust),
            reverse: source.is_action_held(Action::Reverse),
            fire: source.is_action_held(Action::Fire),
        }
    }

    pub fn held(&self, action: Action) -> bool {
        match action {
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::Thrust => self.thrust,
            Action::Reverse => self.reverse,
            Action::Fire => self.fire,
        }
    }
}

impl InputSource for TickInput {
    fn is_action_held(&self, action: Action) -> bool {
        self.held(action)
    }
}

/// Set-backed input source
///
/// Hosts feed key events into it; tests and scripted pilots press actions
/// directly.
#[derive(Debug, Clone, Default)]
pub struct HeldActions {
    held: HashSet<Action>,
}

impl HeldActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source with the given actions already held
    pub fn with(actions: &[Action]) -> Self {
        Self {
            held: actions.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Set an action held or released
    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    /// Forward a key-down event. Unbound keys are ignored.
    pub fn key_down(&mut self, code: &str) {
        if let Some(action) = Action::from_key_code(code) {
            self.press(action);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = Action::from_key_code(code) {
            self.release(action);
        }
    }

    /// Release everything (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl InputSource for HeldActions {
    fn is_action_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}
