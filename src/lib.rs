//! Slime Run - A tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stage, physics, collision, lifecycle)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `input`: Button sampling and edge detection
//! - `audio`: Cue sequences and audio sinks
//! - `renderer`: Visual surface trait and software framebuffer
//! - `present`: Turns stage geometry and game events into surface calls
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod input;
pub mod present;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen resolution
    pub const SCREEN_WIDTH: f32 = 160.0;
    pub const SCREEN_HEIGHT: f32 = 120.0;

    /// Width of one stage tile
    pub const TILE_SIZE: f32 = 8.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_POWER: f32 = -4.0;
    /// Horizontal distance per tick while a direction is held
    pub const MOVE_SPEED: f32 = 1.0;

    /// Top surface of the ground row
    pub const GROUND_Y: f32 = 100.0;
    /// Slime sprite height; standing y is GROUND_Y - PLAYER_HEIGHT
    pub const PLAYER_HEIGHT: f32 = 4.0;
    /// Foot sample offsets from the player's x
    pub const FOOT_LEFT: f32 = 1.0;
    pub const FOOT_RIGHT: f32 = 5.0;

    /// How far below the ground line the player may fall before the run ends
    pub const FALL_TOLERANCE: f32 = 20.0;
    /// Horizontal distance at which a checkpoint or the goal counts as reached
    pub const TRIGGER_RADIUS: f32 = 8.0;
    /// Spawn x relative to the last checkpoint
    pub const SPAWN_OFFSET: f32 = 4.0;

    /// Standing y for the player
    pub const STAND_Y: f32 = GROUND_Y - PLAYER_HEIGHT;
}
