//! Presentation of the simulation on a [`Surface`]
//!
//! Stage geometry stays pure; this module reads it and emits the sprite and
//! text placements. It owns every handle it creates so stages can be rebuilt
//! and banners cleared without leaking surface items.

use glam::Vec2;

use crate::consts::{GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::patterns::*;
use crate::renderer::{Handle, Palette, Surface};
use crate::sim::{GameEvent, GameState, Stage, TileKind, stage::tile_x};

/// Banner line offsets relative to the frozen camera
const BANNER_Y: f32 = 50.0;
const PROMPT_Y: f32 = 70.0;

/// End-of-run text: a headline and a button prompt
#[derive(Debug, Clone, Copy)]
struct Banner {
    message: Handle,
    prompt: Handle,
}

/// Checkpoint flag sprite and where it stands
#[derive(Debug, Clone, Copy)]
struct Flag {
    handle: Handle,
    x: f32,
}

/// Owns all surface handles for one game
#[derive(Debug, Default)]
pub struct Presenter {
    ground: Vec<Handle>,
    flags: Vec<Flag>,
    goal: Option<Handle>,
    player: Option<Handle>,
    banner: Option<Banner>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place ground, flags, goal and the player sprite. Re-running removes the
    /// previous placements first.
    pub fn build_stage<S: Surface>(&mut self, surface: &mut S, stage: &Stage) {
        self.clear(surface);

        for (i, kind) in stage.tiles().iter().enumerate() {
            let x = tile_x(i);
            if kind.is_solid() {
                let handle = surface.place_sprite(&GROUND, Vec2::new(x, GROUND_Y), GROUND_PALETTE);
                self.ground.push(handle);
            }
            match kind {
                TileKind::Checkpoint => {
                    let handle = place_flag(surface, x, CHECKPOINT_PALETTE);
                    self.flags.push(Flag { handle, x });
                }
                TileKind::Goal => {
                    let pos = Vec2::new(x, GROUND_Y - GOAL_FLAG.height() as f32);
                    self.goal = Some(surface.place_sprite(&GOAL_FLAG, pos, GOAL_PALETTE));
                }
                _ => {}
            }
        }

        self.player = Some(surface.place_sprite(&SLIME, Vec2::ZERO, SLIME_PALETTE));
        log::debug!(
            "Built stage visuals: {} ground tiles, {} flags",
            self.ground.len(),
            self.flags.len()
        );
    }

    /// Remove everything this presenter placed
    pub fn clear<S: Surface>(&mut self, surface: &mut S) {
        for handle in self.ground.drain(..) {
            surface.remove(handle);
        }
        for flag in self.flags.drain(..) {
            surface.remove(flag.handle);
        }
        if let Some(handle) = self.goal.take() {
            surface.remove(handle);
        }
        if let Some(handle) = self.player.take() {
            surface.remove(handle);
        }
        self.clear_banner(surface);
    }

    /// React to a simulation event. `state` is the state after the tick.
    pub fn handle_event<S: Surface>(&mut self, surface: &mut S, state: &GameState, event: &GameEvent) {
        match *event {
            GameEvent::Jumped => {}
            GameEvent::CheckpointReached { index, .. } => {
                self.set_flag(surface, index, CHECKPOINT_ACTIVE_PALETTE);
            }
            GameEvent::GameOver => {
                self.show_banner(
                    surface,
                    state.camera_x,
                    ("GAME OVER", 52.0, GAME_OVER_TEXT),
                    ("X:RETRY", 56.0),
                );
            }
            GameEvent::Cleared => {
                self.show_banner(
                    surface,
                    state.camera_x,
                    ("CLEAR!", 60.0, CLEAR_TEXT),
                    ("X:RESTART", 52.0),
                );
            }
            GameEvent::Restarted { full_reset } => {
                self.clear_banner(surface);
                if full_reset {
                    for index in 0..self.flags.len() {
                        self.set_flag(surface, index, CHECKPOINT_PALETTE);
                    }
                }
            }
        }
    }

    /// Move the player sprite to the simulated position
    pub fn sync_player<S: Surface>(&self, surface: &mut S, state: &GameState) {
        if let Some(handle) = self.player {
            surface.move_sprite(handle, state.player.pos);
        }
    }

    /// Scroll the surface to the camera
    pub fn sync_viewport<S: Surface>(&self, surface: &mut S, state: &GameState) {
        surface.set_viewport(state.camera_x, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
    }

    /// Whether an end-of-run banner is showing
    pub fn banner_visible(&self) -> bool {
        self.banner.is_some()
    }

    fn set_flag<S: Surface>(&mut self, surface: &mut S, index: usize, palette: Palette) {
        let Some(flag) = self.flags.get_mut(index) else {
            log::warn!("No flag sprite for checkpoint {}", index);
            return;
        };
        surface.remove(flag.handle);
        flag.handle = place_flag(surface, flag.x, palette);
    }

    fn show_banner<S: Surface>(
        &mut self,
        surface: &mut S,
        camera_x: f32,
        (message, message_dx, palette): (&str, f32, Palette),
        (prompt, prompt_dx): (&str, f32),
    ) {
        self.clear_banner(surface);
        let message = surface.place_text(message, Vec2::new(camera_x + message_dx, BANNER_Y), palette);
        let prompt = surface.place_text(prompt, Vec2::new(camera_x + prompt_dx, PROMPT_Y), PROMPT_TEXT);
        self.banner = Some(Banner { message, prompt });
    }

    fn clear_banner<S: Surface>(&mut self, surface: &mut S) {
        if let Some(banner) = self.banner.take() {
            surface.remove(banner.message);
            surface.remove(banner.prompt);
        }
    }
}

fn place_flag<S: Surface>(surface: &mut S, x: f32, palette: Palette) -> Handle {
    let pos = Vec2::new(x + 1.0, GROUND_Y - CHECKPOINT_FLAG.height() as f32);
    surface.place_sprite(&CHECKPOINT_FLAG, pos, palette)
}
