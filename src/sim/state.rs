//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. One value is one
//! independent play-through; nothing is shared between instances.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera;
use super::stage::Stage;
use crate::consts::*;

/// Current phase of the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Fell into a pit; waiting for retry input
    GameOver,
    /// Reached the goal; waiting for restart input
    Cleared,
}

/// Things that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground from a jump press
    Jumped,
    /// A checkpoint was activated
    CheckpointReached { index: usize, x: f32 },
    /// Player fell past the fall tolerance
    GameOver,
    /// Player reached the goal
    Cleared,
    /// Player respawned; `full_reset` is set when progress was wiped after a clear
    Restarted { full_reset: bool },
}

/// The player-controlled slime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the sprite
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub vy: f32,
    /// Both feet are on solid tiles
    pub grounded: bool,
}

impl Player {
    /// Player standing on the ground line at `x`
    pub fn standing_at(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, STAND_Y),
            vy: 0.0,
            grounded: true,
        }
    }

    /// Horizontal foot sample points (left, right)
    #[inline]
    pub fn feet(&self) -> (f32, f32) {
        (self.pos.x + FOOT_LEFT, self.pos.x + FOOT_RIGHT)
    }
}

/// A checkpoint flag taken from the stage tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Left edge of the checkpoint tile
    pub x: f32,
    pub activated: bool,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub stage: Stage,
    pub player: Player,
    /// Checkpoints in stage order
    pub checkpoints: Vec<Checkpoint>,
    /// x of the most recently activated checkpoint, 0 when none
    pub last_checkpoint: f32,
    /// Left edge of the viewport
    pub camera_x: f32,
    pub phase: GamePhase,
    /// Ticks spent playing
    pub time_ticks: u64,
}

impl GameState {
    /// Boot a play-through on `stage` and spawn at the stage start
    pub fn new(stage: Stage) -> Self {
        let checkpoints = stage
            .checkpoint_xs()
            .map(|x| Checkpoint { x, activated: false })
            .collect();

        let mut state = Self {
            stage,
            player: Player::standing_at(SPAWN_OFFSET),
            checkpoints,
            last_checkpoint: 0.0,
            camera_x: 0.0,
            phase: GamePhase::Playing,
            time_ticks: 0,
        };
        state.restart();
        state
    }

    /// Respawn at the last checkpoint and resume play
    pub fn restart(&mut self) {
        self.player = Player::standing_at(self.last_checkpoint + SPAWN_OFFSET);
        self.update_camera();
        self.phase = GamePhase::Playing;
        log::info!("Spawned at x={}", self.player.pos.x);
    }

    /// Forget all checkpoint progress (used when restarting after a clear)
    pub fn reset_progress(&mut self) {
        for cp in &mut self.checkpoints {
            cp.activated = false;
        }
        self.last_checkpoint = 0.0;
    }

    /// Recompute the viewport origin from the player position
    pub fn update_camera(&mut self) {
        self.camera_x = camera::follow(self.player.pos.x, self.stage.length());
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_spawns_at_start() {
        let state = GameState::new(Stage::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(4.0, 96.0));
        assert!(state.player.grounded);
        assert_eq!(state.player.vy, 0.0);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.checkpoints.len(), 2);
        assert!(state.checkpoints.iter().all(|cp| !cp.activated));
    }

    #[test]
    fn test_restart_uses_last_checkpoint() {
        let mut state = GameState::new(Stage::default());
        state.checkpoints[0].activated = true;
        state.last_checkpoint = 216.0;
        state.phase = GamePhase::GameOver;

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos.x, 220.0);
        assert_eq!(state.player.pos.y, STAND_Y);
        // 220 - 160/3
        assert!((state.camera_x - 166.666_67).abs() < 0.001);
    }

    #[test]
    fn test_reset_progress() {
        let mut state = GameState::new(Stage::default());
        for cp in &mut state.checkpoints {
            cp.activated = true;
        }
        state.last_checkpoint = 400.0;

        state.reset_progress();
        assert_eq!(state.last_checkpoint, 0.0);
        assert!(state.checkpoints.iter().all(|cp| !cp.activated));
    }

    #[test]
    fn test_feet() {
        let player = Player::standing_at(10.0);
        assert_eq!(player.feet(), (11.0, 15.0));
    }
}
