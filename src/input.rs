//! Button sampling and edge detection
//!
//! Hosts report which buttons are held each frame. [`InputTracker`] turns
//! those snapshots into a [`TickInput`]: movement uses the held level, jump
//! and restart only fire on the frame the button goes down.

use std::collections::VecDeque;

use crate::consts::{FOOT_RIGHT, MOVE_SPEED};
use crate::sim::{GameState, TickInput};

/// Held state of every button the game reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    /// Jump button (B0)
    pub jump: bool,
    /// Retry/restart button (B1)
    pub restart: bool,
}

impl Buttons {
    pub const RIGHT: Buttons = Buttons {
        left: false,
        right: true,
        jump: false,
        restart: false,
    };
}

/// Remembers last frame's buttons to detect fresh presses
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    prev: Buttons,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert this frame's held buttons into tick input
    pub fn sample(&mut self, held: Buttons) -> TickInput {
        let input = TickInput {
            left: held.left,
            right: held.right,
            jump: held.jump && !self.prev.jump,
            restart: held.restart && !self.prev.restart,
        };
        self.prev = held;
        input
    }
}

/// Per-tick input provider
///
/// Sources get a read-only view of the game so automated drivers can react to
/// it; keyboard-style sources ignore it.
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed list of button snapshots, then releases everything
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Buttons>,
    tracker: InputTracker,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Buttons>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            tracker: InputTracker::new(),
        }
    }

    /// Append `count` frames of `buttons`
    pub fn hold(&mut self, buttons: Buttons, count: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat_n(buttons, count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        let held = self.frames.pop_front().unwrap_or_default();
        self.tracker.sample(held)
    }
}

/// Naive demo driver: runs right, hops at pit edges, retries when the run ends
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    tracker: InputTracker,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn decide(state: &GameState) -> Buttons {
        if !state.is_playing() {
            return Buttons {
                restart: true,
                ..Default::default()
            };
        }

        let player = &state.player;
        let next_right_foot = player.pos.x + FOOT_RIGHT + MOVE_SPEED;
        Buttons {
            right: true,
            jump: player.grounded && !state.stage.is_ground_at(next_right_foot),
            ..Default::default()
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        self.tracker.sample(Self::decide(state))
    }
}
