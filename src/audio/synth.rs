//! The tone synthesizer behind the on-screen keyboard.
//!
//! Fire-and-forget: `play_note` resolves the key name and voice through
//! the core tables, shapes the note with the default contour, and hands
//! it to the shared output stage. Nothing is returned and nothing is
//! awaited - the mixer plays the note out on its own. If the output
//! stage could not be initialized the synthesizer degrades to a logged
//! no-op instead of failing.

use crate::audio::engine::{AudioEngine, EngineHandle};
use crate::audio::tone::EnvelopedTone;
use etude_core::types::{key_frequency, EnvelopeParams, Voice};

/// Duration used when the caller doesn't ask for one.
pub const DEFAULT_NOTE_DURATION: f32 = 0.5;

pub struct ToneSynthesizer {
    engine: Option<AudioEngine>,
}

impl ToneSynthesizer {
    /// Create a synthesizer on the default output device. If no device
    /// is available the synthesizer still constructs, but every
    /// `play_note` becomes a warned no-op.
    pub fn new() -> Self {
        match AudioEngine::new() {
            Ok(engine) => Self {
                engine: Some(engine),
            },
            Err(e) => {
                log::warn!("failed to initialize audio output: {}; notes will be silent", e);
                Self { engine: None }
            }
        }
    }

    /// A synthesizer with no output at all, for headless environments.
    pub fn disabled() -> Self {
        Self { engine: None }
    }

    /// Play one note with the default half-second duration.
    pub fn play_note(&self, note: &str, voice: Voice) {
        self.play_note_for(note, voice, DEFAULT_NOTE_DURATION);
    }

    /// Play one note for `duration_secs` seconds.
    ///
    /// Unknown key names fall back to 440 Hz and unknown voices to the
    /// sine waveform - neither is an error. Never panics and never
    /// reports failure to the caller; problems are logged and the call
    /// becomes a no-op.
    pub fn play_note_for(&self, note: &str, voice: Voice, duration_secs: f32) {
        let Some(engine) = &self.engine else {
            log::warn!("audio output not initialized; dropping note {}", note);
            return;
        };

        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            log::debug!("ignoring note {} with non-positive duration", note);
            return;
        }

        let handle = engine.handle();
        let frequency = key_frequency(note);
        let tone = EnvelopedTone::new(
            frequency,
            voice.waveform(),
            EnvelopeParams::note_default(),
            duration_secs,
            handle.sample_rate(),
        );
        handle.submit_tone(tone);

        log::debug!(
            "playing {} on {} at {:.2} Hz for {:.2}s",
            note,
            voice,
            frequency,
            duration_secs
        );
    }

    /// Handle to the shared output stage, if one exists. The metronome
    /// mixes its clicks through this.
    pub fn output(&self) -> Option<EngineHandle> {
        self.engine.as_ref().map(|engine| engine.handle())
    }

    /// Whether an output stage is up.
    pub fn is_active(&self) -> bool {
        self.engine.as_ref().is_some_and(|engine| engine.is_open())
    }

    /// Set the master volume of the shared output stage (0.0-1.0).
    pub fn set_master_volume(&self, volume: f32) {
        if let Some(engine) = &self.engine {
            engine.handle().set_master_volume(volume);
        }
    }

    /// Release the audio output entirely. Idempotent: calling this on an
    /// already-cleaned synthesizer does nothing.
    pub fn cleanup(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.close();
        }
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
