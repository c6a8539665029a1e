//! Tone generators mixed into the output stream.
//!
//! Two kinds of sound exist in the engine: `EnvelopedTone`, a
//! fixed-frequency note shaped by the linear ADSR contour for its whole
//! duration, and `ClickTone`, the metronome's short square-wave burst
//! with a fast exponential gain decay. Both are plain sample generators;
//! the mixer in [`crate::audio::engine`] owns and drains them.

use etude_core::types::{EnvelopeParams, Waveform};
use std::f32::consts::PI;

/// One played note: oscillator fixed at its resolved frequency, with the
/// amplitude contour applied against the note's total duration.
pub struct EnvelopedTone {
    frequency: f32,
    waveform: Waveform,
    envelope: EnvelopeParams,
    duration: f32,
    phase: f32,
    sample_rate: f32,
    elapsed_samples: u64,
    total_samples: u64,
}

impl EnvelopedTone {
    pub fn new(
        frequency: f32,
        waveform: Waveform,
        envelope: EnvelopeParams,
        duration_secs: f32,
        sample_rate: f32,
    ) -> Self {
        Self {
            frequency,
            waveform,
            envelope,
            duration: duration_secs,
            phase: 0.0,
            sample_rate,
            elapsed_samples: 0,
            total_samples: (duration_secs * sample_rate) as u64,
        }
    }

    /// Whether the note's duration has fully elapsed.
    pub fn is_finished(&self) -> bool {
        self.elapsed_samples >= self.total_samples
    }

    /// Generate the next sample.
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let value = self.generate_waveform();

        // Advance phase
        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        let t = self.elapsed_samples as f32 / self.sample_rate;
        self.elapsed_samples += 1;

        value * self.envelope.amplitude_at(t, self.duration)
    }

    /// Generate raw waveform value based on current phase (0.0 to 1.0)
    fn generate_waveform(&self) -> f32 {
        match self.waveform {
            Waveform::Sine => self.sine(),
            Waveform::Saw => self.saw(),
            Waveform::Square => self.square(),
            Waveform::Triangle => self.triangle(),
        }
    }

    /// Sine wave: smooth, pure tone
    #[inline]
    fn sine(&self) -> f32 {
        (2.0 * PI * self.phase).sin()
    }

    /// Sawtooth wave: bright, buzzy - all harmonics
    #[inline]
    fn saw(&self) -> f32 {
        2.0 * self.phase - 1.0
    }

    /// Square wave: hollow, woody - odd harmonics only
    #[inline]
    fn square(&self) -> f32 {
        if self.phase < 0.5 { 1.0 } else { -1.0 }
    }

    /// Triangle wave: mellow, flute-like
    #[inline]
    fn triangle(&self) -> f32 {
        if self.phase < 0.5 {
            4.0 * self.phase - 1.0
        } else {
            3.0 - 4.0 * self.phase
        }
    }
}

/// How long a metronome click rings.
pub const CLICK_SECONDS: f32 = 0.1;

/// Click gain at the instant of the tick.
pub const CLICK_PEAK_GAIN: f32 = 0.1;

/// Gain the click decays to by the end of its burst.
pub const CLICK_FLOOR_GAIN: f32 = 0.01;

/// One metronome click: a square-wave burst whose gain decays
/// exponentially from [`CLICK_PEAK_GAIN`] to [`CLICK_FLOOR_GAIN`] over
/// [`CLICK_SECONDS`]. Deliberately not the full note contour - a click
/// needs a hard edge, not an attack ramp.
pub struct ClickTone {
    frequency: f32,
    phase: f32,
    sample_rate: f32,
    elapsed_samples: u64,
    total_samples: u64,
}

impl ClickTone {
    pub fn new(frequency: f32, sample_rate: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            sample_rate,
            elapsed_samples: 0,
            total_samples: (CLICK_SECONDS * sample_rate) as u64,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_samples >= self.total_samples
    }

    /// Generate the next sample.
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let value = if self.phase < 0.5 { 1.0 } else { -1.0 };

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        let t = self.elapsed_samples as f32 / self.sample_rate;
        self.elapsed_samples += 1;

        let gain =
            CLICK_PEAK_GAIN * (CLICK_FLOOR_GAIN / CLICK_PEAK_GAIN).powf(t / CLICK_SECONDS);
        value * gain
    }
}
