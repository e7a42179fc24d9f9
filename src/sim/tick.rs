//! Per-frame simulation step
//!
//! Advances the game by exactly one frame. Movement and gravity come first,
//! then ground resolution, then the fall check, checkpoints, goal and camera,
//! in that order. Each terminal transition ends the tick immediately.

use super::collision::{fell_out, resolve_ground};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (pressed this frame)
    pub jump: bool,
    /// Retry/restart after the run ended (pressed this frame)
    pub restart: bool,
}

/// Advance the game state by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Playing => step_playing(state, input, &mut events),
        GamePhase::GameOver | GamePhase::Cleared => {
            if input.restart {
                let full_reset = state.phase == GamePhase::Cleared;
                if full_reset {
                    state.reset_progress();
                }
                state.restart();
                events.push(GameEvent::Restarted { full_reset });
            }
        }
    }

    events
}

fn step_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;
    let player = &mut state.player;

    if input.left && player.pos.x > 0.0 {
        player.pos.x -= MOVE_SPEED;
    }
    if input.right {
        player.pos.x += MOVE_SPEED;
    }

    if input.jump && player.grounded {
        player.vy = JUMP_POWER;
        player.grounded = false;
        events.push(GameEvent::Jumped);
    }

    player.vy += GRAVITY;
    player.pos.y += player.vy;

    resolve_ground(&state.stage, player);

    if fell_out(player) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!("Game over at x={:.1}", player.pos.x);
        return;
    }

    let x = player.pos.x;
    for (index, cp) in state.checkpoints.iter_mut().enumerate() {
        if !cp.activated && (x - cp.x).abs() < TRIGGER_RADIUS {
            cp.activated = true;
            state.last_checkpoint = cp.x;
            events.push(GameEvent::CheckpointReached { index, x: cp.x });
            log::debug!("Checkpoint {} reached at x={}", index, cp.x);
        }
    }

    if let Some(goal_x) = state.stage.goal_x() {
        if (x - goal_x).abs() < TRIGGER_RADIUS {
            state.phase = GamePhase::Cleared;
            events.push(GameEvent::Cleared);
            log::info!("Stage cleared after {} ticks", state.time_ticks);
            return;
        }
    }

    state.update_camera();
}
