//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, no wall-clock time
//! - Input sampled once per tick
//! - Stable iteration order (stage order for checkpoints)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod stage;
pub mod state;
pub mod tick;

pub use collision::{GroundContact, feet_on_ground, resolve_ground};
pub use stage::{Stage, StageError, StageFile, TileKind};
pub use state::{Checkpoint, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
