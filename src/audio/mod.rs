//! Audio cues
//!
//! Every sound in the game is a short fixed note sequence. The simulation
//! never talks to an audio backend directly: the frame driver asks a
//! [`CuePlayer`] to play a [`Cue`], and the player forwards it to whatever
//! [`AudioSink`] the host provided. Only one cue sounds at a time.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

/// One note of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Semitones above C4
    pub number: u8,
    /// Length in frames (1/60 s)
    pub duration: u8,
}

const fn note(number: u8, duration: u8) -> Note {
    Note { number, duration }
}

const JUMP: [Note; 2] = [note(14, 2), note(18, 2)];
const CHECKPOINT: [Note; 4] = [note(12, 4), note(16, 4), note(19, 4), note(24, 8)];
const GAME_OVER: [Note; 4] = [note(12, 8), note(10, 8), note(7, 8), note(4, 16)];
const CLEAR: [Note; 8] = [
    note(12, 4),
    note(14, 4),
    note(16, 4),
    note(17, 4),
    note(19, 4),
    note(21, 4),
    note(23, 4),
    note(24, 16),
];

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Player jumped - quick rising blip
    Jump,
    /// Checkpoint activated - major arpeggio
    Checkpoint,
    /// Fell into a pit - descending
    GameOver,
    /// Goal reached - rising scale
    Clear,
}

impl Cue {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Cue::Jump => &JUMP,
            Cue::Checkpoint => &CHECKPOINT,
            Cue::GameOver => &GAME_OVER,
            Cue::Clear => &CLEAR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Checkpoint => "checkpoint",
            Cue::GameOver => "gameover",
            Cue::Clear => "clear",
        }
    }

    /// Total length in frames
    pub fn duration(self) -> u32 {
        self.notes().iter().map(|n| n.duration as u32).sum()
    }
}

/// Handle to a sequence started on an [`AudioSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CueHandle(pub u32);

/// Something that can play note sequences
pub trait AudioSink {
    /// Start playing `notes`, returning a handle that can stop them
    fn play(&mut self, notes: &[Note]) -> CueHandle;
    /// Stop a sequence. Stopping a finished sequence is a no-op.
    fn stop(&mut self, handle: CueHandle);
}

/// Plays cues on a sink, cutting off whatever cue was still sounding
#[derive(Debug)]
pub struct CuePlayer<A> {
    sink: A,
    current: Option<CueHandle>,
}

impl<A: AudioSink> CuePlayer<A> {
    pub fn new(sink: A) -> Self {
        Self {
            sink,
            current: None,
        }
    }

    /// Play a cue, replacing any cue still playing
    pub fn play(&mut self, cue: Cue) {
        self.stop();
        log::debug!("Playing {} cue", cue.as_str());
        self.current = Some(self.sink.play(cue.notes()));
    }

    /// Stop the current cue, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.current.take() {
            self.sink.stop(handle);
        }
    }

    pub fn current(&self) -> Option<CueHandle> {
        self.current
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink {
    next_handle: u32,
    muted: bool,
    audible: u32,
}

impl LogSink {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues that would have been heard
    pub fn audible(&self) -> u32 {
        self.audible
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, notes: &[Note]) -> CueHandle {
        self.next_handle += 1;
        if self.muted {
            log::debug!("cue #{} muted", self.next_handle);
        } else {
            self.audible += 1;
            let numbers: Vec<u8> = notes.iter().map(|n| n.number).collect();
            log::info!("cue #{} notes {:?}", self.next_handle, numbers);
        }
        CueHandle(self.next_handle)
    }

    fn stop(&mut self, handle: CueHandle) {
        log::trace!("cue #{} stopped", handle.0);
    }
}

/// Equal-tempered frequency for a note number (0 = C4)
pub fn note_frequency(number: u8) -> f32 {
    const C4: f32 = 261.63;
    C4 * 2f32.powf(number as f32 / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<Vec<Note>>,
        stopped: Vec<CueHandle>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, notes: &[Note]) -> CueHandle {
            self.played.push(notes.to_vec());
            CueHandle(self.played.len() as u32)
        }

        fn stop(&mut self, handle: CueHandle) {
            self.stopped.push(handle);
        }
    }

    #[test]
    fn test_cue_sequences() {
        assert_eq!(Cue::Jump.notes(), &[note(14, 2), note(18, 2)]);
        assert_eq!(Cue::Checkpoint.notes().len(), 4);
        assert_eq!(Cue::GameOver.notes().last(), Some(&note(4, 16)));
        assert_eq!(Cue::Clear.notes().len(), 8);
        assert_eq!(Cue::Clear.duration(), 44);
    }

    #[test]
    fn test_new_cue_replaces_old() {
        let mut player = CuePlayer::new(Recorder::default());
        player.play(Cue::Jump);
        assert!(player.sink().stopped.is_empty());

        player.play(Cue::Checkpoint);
        assert_eq!(player.sink().stopped, vec![CueHandle(1)]);
        assert_eq!(player.current(), Some(CueHandle(2)));
        assert_eq!(player.sink().played[1], Cue::Checkpoint.notes());
    }

    #[test]
    fn test_stop_clears_handle() {
        let mut player = CuePlayer::new(Recorder::default());
        player.stop();
        assert!(player.sink().stopped.is_empty());

        player.play(Cue::Clear);
        player.stop();
        player.stop();
        assert_eq!(player.sink().stopped, vec![CueHandle(1)]);
        assert_eq!(player.current(), None);
    }

    #[test]
    fn test_muted_log_sink_still_hands_out_handles() {
        let mut player = CuePlayer::new(LogSink::new(true));
        player.play(Cue::Jump);
        player.play(Cue::Clear);
        assert_eq!(player.current(), Some(CueHandle(2)));
        assert_eq!(player.sink().audible(), 0);

        player.sink_mut().set_muted(false);
        player.play(Cue::Checkpoint);
        assert_eq!(player.sink().audible(), 1);
    }

    #[test]
    fn test_note_frequency() {
        assert!((note_frequency(0) - 261.63).abs() < 0.01);
        assert!((note_frequency(12) - 523.26).abs() < 0.01);
    }
}
