//! Frame driver
//!
//! [`Game`] owns one simulation plus its three collaborators (input, surface,
//! audio). The host calls [`Game::tick`] once per frame; everything else
//! happens inside that call.

use crate::audio::{AudioSink, Cue, CuePlayer};
use crate::input::InputSource;
use crate::present::Presenter;
use crate::renderer::Surface;
use crate::sim::{self, GameEvent, GameState, Stage};

/// A running game wired to its collaborators
pub struct Game<I, S, A> {
    state: GameState,
    input: I,
    surface: S,
    audio: CuePlayer<A>,
    presenter: Presenter,
}

impl<I: InputSource, S: Surface, A: AudioSink> Game<I, S, A> {
    /// Build the stage visuals and spawn the player at the stage start
    pub fn new(stage: Stage, input: I, surface: S, audio: A) -> Self {
        let mut game = Self {
            state: GameState::new(stage),
            input,
            surface,
            audio: CuePlayer::new(audio),
            presenter: Presenter::new(),
        };
        game.presenter.build_stage(&mut game.surface, &game.state.stage);
        game.sync_visuals();
        log::info!(
            "Game ready: stage {} tiles, {} checkpoints",
            game.state.stage.tile_count(),
            game.state.checkpoints.len()
        );
        game
    }

    /// Replace the stage and start over with no progress
    pub fn load_stage(&mut self, stage: Stage) {
        self.audio.stop();
        self.state = GameState::new(stage);
        self.presenter.build_stage(&mut self.surface, &self.state.stage);
        self.sync_visuals();
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let input = self.input.poll(&self.state);
        let events = sim::tick(&mut self.state, &input);

        for event in &events {
            if let Some(cue) = cue_for(event) {
                self.audio.play(cue);
            }
            self.presenter
                .handle_event(&mut self.surface, &self.state, event);
        }

        if self.state.is_playing() {
            self.sync_visuals();
        } else {
            // Camera stays frozen; the sprite still shows where the player ended
            self.presenter.sync_player(&mut self.surface, &self.state);
        }

        events
    }

    fn sync_visuals(&mut self) {
        self.presenter.sync_player(&mut self.surface, &self.state);
        self.presenter.sync_viewport(&mut self.surface, &self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &CuePlayer<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut CuePlayer<A> {
        &mut self.audio
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }
}

/// Audio cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Jumped => Some(Cue::Jump),
        GameEvent::CheckpointReached { .. } => Some(Cue::Checkpoint),
        GameEvent::GameOver => Some(Cue::GameOver),
        GameEvent::Cleared => Some(Cue::Clear),
        GameEvent::Restarted { .. } => None,
    }
}
