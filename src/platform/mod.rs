//! Platform abstraction layer
//!
//! The host owns the window and the keyboard. Each frame it hands the
//! simulation:
//! - The current viewport size (re-read every frame, it may change on resize)
//! - A pressed/released state per logical action

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visible world bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport; negative or non-finite sizes collapse to zero
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when the point lies inside the bounds (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveUp,
    MoveRight,
    MoveDown,
    Fire,
    TripleFire,
    Burst,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveUp,
        Action::MoveRight,
        Action::MoveDown,
        Action::Fire,
        Action::TripleFire,
        Action::Burst,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Pressed state per logical action, refreshed by the host before each frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    pressed: [bool; Action::ALL.len()],
}

impl ActionState {
    pub fn set(&mut self, action: Action, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Release every action (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.pressed = [false; Action::ALL.len()];
    }
}
