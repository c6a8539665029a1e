//! Beat and tempo arithmetic for the metronome and song playback.
//!
//! Everything here is pure: the tick period derived from a tempo, the
//! caller-side tempo clamp, and the 4-beat measure counter that marks
//! the downbeat.

use std::time::Duration;

/// Beats per measure (4/4 time).
pub const BEATS_PER_MEASURE: u32 = 4;

/// Slowest selectable tempo.
pub const MIN_TEMPO_BPM: u32 = 60;

/// Fastest selectable tempo.
pub const MAX_TEMPO_BPM: u32 = 200;

/// Clamp a tempo into the selectable [`MIN_TEMPO_BPM`]..[`MAX_TEMPO_BPM`]
/// range. The scheduler itself accepts any positive tempo; callers apply
/// this before handing a tempo over.
pub fn clamp_tempo(bpm: u32) -> u32 {
    bpm.clamp(MIN_TEMPO_BPM, MAX_TEMPO_BPM)
}

/// Duration of one beat in milliseconds at the given tempo.
///
/// 120 BPM → 500 ms, 60 BPM → 1000 ms, 200 BPM → 300 ms.
pub fn beat_interval_ms(bpm: u32) -> u64 {
    60_000 / bpm as u64
}

/// Duration of one beat at the given tempo.
pub fn beat_interval(bpm: u32) -> Duration {
    Duration::from_millis(beat_interval_ms(bpm))
}

/// One metronome tick: the beat value within the measure and whether it
/// is the accented downbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// Beat value within the measure, cycling 0-3.
    pub value: u32,
    /// True exactly when `value` is 1, the accented first beat.
    pub is_downbeat: bool,
}

/// Beat counter cycling through a 4-beat measure.
///
/// Starts at 0; each `advance` increments modulo 4, so a fresh counter
/// produces the sequence 1, 2, 3, 0, 1, ... The downbeat is the tick
/// that lands on value 1.
#[derive(Debug, Clone, Default)]
pub struct MeasureCounter {
    beat: u32,
}

impl MeasureCounter {
    pub fn new() -> Self {
        Self { beat: 0 }
    }

    /// Advance to the next beat and report it.
    pub fn advance(&mut self) -> Beat {
        self.beat = (self.beat + 1) % BEATS_PER_MEASURE;
        Beat {
            value: self.beat,
            is_downbeat: self.beat == 1,
        }
    }

    /// Reset to the start of a measure.
    pub fn reset(&mut self) {
        self.beat = 0;
    }

    /// The most recent beat value.
    pub fn current(&self) -> u32 {
        self.beat
    }
}
