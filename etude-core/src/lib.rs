//! # Etude Core
//!
//! Audio-free core library for the Etude piano practice engine. Provides
//! the keyboard note table, voice/waveform presets, envelope math, beat
//! and tempo arithmetic, the built-in song library, and practice scoring,
//! without pulling in audio or threading dependencies.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization of the pure data types for web
//!   interop (disabled by default).
//!
//! ## Example
//!
//! ```ignore
//! use etude_core::types::{key_frequency, Voice, Waveform};
//!
//! assert_eq!(key_frequency("A4"), 440.0);
//! assert_eq!(Voice::from_name("piano").waveform(), Waveform::Triangle);
//! ```

pub mod types;

// Re-export commonly used types
pub use types::{
    Beat, Difficulty, EnvelopeParams, MeasureCounter, PracticeStats, Song, Voice, Waveform,
};
