//! Amplitude envelope for played notes.
//!
//! Notes are shaped by a piecewise-linear attack-decay-sustain-release
//! contour evaluated against the note's total duration: silence at the
//! start, a linear ramp to the attack peak, a ramp down to the sustain
//! level, a hold, and a final ramp to silence ending exactly when the
//! note ends. The contour is a pure function of time, which keeps it
//! cheap to evaluate per sample and trivial to test.

/// Level reached at the end of the attack ramp.
pub const ATTACK_PEAK: f32 = 0.8;

/// Envelope timing parameters.
///
/// - `attack`: seconds to rise from 0 to [`ATTACK_PEAK`]
/// - `decay`: seconds to fall from the peak to `sustain`
/// - `sustain`: level held between decay and release (0.0-1.0, NOT time!)
/// - `release`: seconds to fall from `sustain` to 0, ending at the
///   note's total duration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvelopeParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl EnvelopeParams {
    /// Create custom envelope parameters. Negative durations are clamped
    /// to zero and the sustain level to the 0.0-1.0 range.
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }

    /// The contour every played note uses: 100 ms attack, 200 ms decay,
    /// 0.6 sustain, 300 ms release.
    pub fn note_default() -> Self {
        Self::new(0.1, 0.2, 0.6, 0.3)
    }

    /// Where the release ramp begins for a note of the given duration.
    ///
    /// Nominally `duration - release`, clamped so the release can never
    /// start before the decay has finished. Short notes therefore get a
    /// compressed (or absent) release instead of out-of-order segments.
    pub fn release_start(&self, duration: f32) -> f32 {
        (duration - self.release).max(self.attack + self.decay)
    }

    /// Envelope level at `t` seconds into a note of the given duration.
    ///
    /// Returns 0.0 outside `[0, duration)`. Notes shorter than
    /// `attack + decay` truncate mid-ramp and cut to silence at the end
    /// of the note.
    pub fn amplitude_at(&self, t: f32, duration: f32) -> f32 {
        if t < 0.0 || t >= duration || duration <= 0.0 {
            return 0.0;
        }

        if t < self.attack {
            return ATTACK_PEAK * t / self.attack;
        }

        let decay_end = self.attack + self.decay;
        if t < decay_end {
            let frac = (t - self.attack) / self.decay;
            return ATTACK_PEAK + (self.sustain - ATTACK_PEAK) * frac;
        }

        let release_start = self.release_start(duration);
        if t < release_start {
            return self.sustain;
        }

        let release_len = duration - release_start;
        if release_len <= 0.0 {
            return 0.0;
        }
        let frac = (t - release_start) / release_len;
        self.sustain * (1.0 - frac)
    }
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self::note_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_silent_outside_note() {
        let env = EnvelopeParams::note_default();
        assert_eq!(env.amplitude_at(-0.1, 1.0), 0.0);
        assert_eq!(env.amplitude_at(1.0, 1.0), 0.0);
        assert_eq!(env.amplitude_at(1.5, 1.0), 0.0);
    }

    #[test]
    fn test_attack_ramp() {
        let env = EnvelopeParams::note_default();
        assert_eq!(env.amplitude_at(0.0, 1.0), 0.0);
        assert!((env.amplitude_at(0.05, 1.0) - 0.4).abs() < EPSILON);
        assert!((env.amplitude_at(0.1, 1.0) - ATTACK_PEAK).abs() < EPSILON);
    }

    #[test]
    fn test_decay_reaches_sustain() {
        let env = EnvelopeParams::note_default();
        // Decay runs from 0.1 to 0.3, landing on the sustain level
        assert!((env.amplitude_at(0.2, 1.0) - 0.7).abs() < EPSILON);
        assert!((env.amplitude_at(0.3, 1.0) - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_sustain_hold() {
        let env = EnvelopeParams::note_default();
        // For a 1 s note the release starts at 0.7
        assert!((env.amplitude_at(0.5, 1.0) - 0.6).abs() < EPSILON);
        assert!((env.amplitude_at(0.69, 1.0) - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_release_ramp_ends_at_duration() {
        let env = EnvelopeParams::note_default();
        assert!((env.amplitude_at(0.7, 1.0) - 0.6).abs() < EPSILON);
        assert!((env.amplitude_at(0.85, 1.0) - 0.3).abs() < EPSILON);
        assert!(env.amplitude_at(0.999, 1.0) < 0.01);
        assert_eq!(env.amplitude_at(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_release_never_starts_before_decay_ends() {
        let env = EnvelopeParams::note_default();
        // A 0.5 s note: duration - release = 0.2, but attack + decay = 0.3
        assert_eq!(env.release_start(0.5), 0.3);
        // Level still on the decay ramp just before 0.3
        assert!((env.amplitude_at(0.29, 0.5) - env.amplitude_at(0.29, 1.0)).abs() < EPSILON);
        // Release compressed into the remaining 0.2 s
        assert!((env.amplitude_at(0.4, 0.5) - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_very_short_note_truncates() {
        let env = EnvelopeParams::note_default();
        // Shorter than attack + decay: contour cuts off mid-ramp
        assert!(env.amplitude_at(0.05, 0.2) > 0.0);
        assert!(env.amplitude_at(0.15, 0.2) > 0.0);
        assert_eq!(env.amplitude_at(0.2, 0.2), 0.0);
    }

    #[test]
    fn test_release_monotonically_falls() {
        let env = EnvelopeParams::note_default();
        let mut prev = env.amplitude_at(0.70, 1.0);
        for i in 71..100 {
            let t = i as f32 / 100.0;
            let level = env.amplitude_at(t, 1.0);
            assert!(level <= prev, "release rose at t={}", t);
            prev = level;
        }
    }

    #[test]
    fn test_params_clamping() {
        let params = EnvelopeParams::new(-0.1, -0.2, 1.5, -0.3);
        assert_eq!(params.attack, 0.0);
        assert_eq!(params.decay, 0.0);
        assert_eq!(params.sustain, 1.0);
        assert_eq!(params.release, 0.0);
    }

    #[test]
    fn test_output_range() {
        let env = EnvelopeParams::note_default();
        for i in 0..200 {
            let t = i as f32 / 100.0;
            let level = env.amplitude_at(t, 1.5);
            assert!((0.0..=1.0).contains(&level), "level {} out of range", level);
        }
    }
}
