//! Voice presets and oscillator waveforms.
//!
//! A voice is a named timbre the player picks from the instrument
//! selector; each voice maps to exactly one oscillator waveform.

/// Available waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Waveform {
    #[default]
    Sine,
    Saw,
    Square,
    Triangle,
}

impl Waveform {
    /// Parse waveform from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Waveform> {
        match s.to_lowercase().as_str() {
            "sine" | "sin" => Some(Waveform::Sine),
            "saw" | "sawtooth" => Some(Waveform::Saw),
            "square" | "sq" => Some(Waveform::Square),
            "triangle" | "tri" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Saw => "saw",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }
}

/// A named instrument voice.
///
/// Unrecognized voice names resolve to [`Voice::Plain`], the sine-wave
/// default - voice resolution is total, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Voice {
    Piano,
    Organ,
    Synth,
    #[default]
    Plain,
}

impl Voice {
    /// Resolve a voice tag (case-insensitive); anything unrecognized is
    /// the plain sine voice.
    pub fn from_name(name: &str) -> Voice {
        match name.to_lowercase().as_str() {
            "piano" => Voice::Piano,
            "organ" => Voice::Organ,
            "synth" => Voice::Synth,
            _ => Voice::Plain,
        }
    }

    /// The single waveform this voice plays with.
    pub fn waveform(&self) -> Waveform {
        match self {
            Voice::Piano => Waveform::Triangle,
            Voice::Organ => Waveform::Square,
            Voice::Synth => Waveform::Saw,
            Voice::Plain => Waveform::Sine,
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Piano => "piano",
            Voice::Organ => "organ",
            Voice::Synth => "synth",
            Voice::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
