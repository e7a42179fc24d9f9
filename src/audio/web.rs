//! Audio sink using the Web Audio API
//!
//! Cues are synthesized as square-wave blips, one oscillator per note,
//! scheduled back to back. No external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSink, CueHandle, Note, note_frequency};
use crate::settings::Settings;

/// Seconds per note duration unit
const FRAME_SECS: f64 = 1.0 / 60.0;

/// Oscillators belonging to one started cue
struct Voice {
    handle: CueHandle,
    oscillators: Vec<OscillatorNode>,
}

/// Web Audio backed cue sink
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    next_handle: u32,
    voice: Option<Voice>,
}

impl WebAudioSink {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
            next_handle: 0,
            voice: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn schedule(ctx: &AudioContext, notes: &[Note], vol: f32) -> Vec<OscillatorNode> {
        let mut oscillators = Vec::with_capacity(notes.len());
        let mut t = ctx.current_time();
        for note in notes {
            let len = note.duration as f64 * FRAME_SECS;
            if let Some((osc, gain)) = Self::create_osc(ctx, note_frequency(note.number)) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + len)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + len).ok();
                oscillators.push(osc);
            }
            t += len;
        }
        oscillators
    }
}

impl AudioSink for WebAudioSink {
    fn play(&mut self, notes: &[Note]) -> CueHandle {
        self.next_handle += 1;
        let handle = CueHandle(self.next_handle);

        let vol = self.effective_volume();
        let Some(ctx) = &self.ctx else { return handle };
        if vol <= 0.0 {
            return handle;
        }

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let oscillators = Self::schedule(ctx, notes, vol);
        self.voice = Some(Voice {
            handle,
            oscillators,
        });
        handle
    }

    fn stop(&mut self, handle: CueHandle) {
        let Some(voice) = self.voice.take_if(|v| v.handle == handle) else {
            return;
        };
        for osc in voice.oscillators {
            osc.stop().ok();
        }
    }
}
