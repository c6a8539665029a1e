//! # Etude
//!
//! Etude is a piano practice engine: a tone synthesizer behind a
//! two-octave virtual keyboard, a metronome with a distinguished
//! downbeat, and practice/learn sessions that judge key presses against
//! a built-in song library. An interactive REPL fronts the engine the
//! way the app screens would.
//!
//! ## Modules
//!
//! - `audio`: the cpal output stage, tone/click generators, the
//!   `ToneSynthesizer`, and the `Metronome` beat scheduler.
//! - `practice`: free/guided/feedback practice sessions with accuracy
//!   and streak tracking.
//! - `learn`: play-along mode - timed note prompts, falling-note state,
//!   and scoring.
//! - `commands` / `repl`: the interactive front end.
//!
//! Pure data types (note table, voices, envelope math, beat arithmetic,
//! songs, stats) live in the `etude-core` crate and are re-exported
//! through [`types`].

pub mod audio;
pub mod commands;
pub mod learn;
pub mod practice;
pub mod repl;

pub use etude_core::types;

// Re-export commonly used types for convenience
pub use crate::audio::{Metronome, ToneSynthesizer};
pub use crate::learn::{LearnSession, SongPlayer};
pub use crate::practice::{PracticeMode, PracticeSession};
pub use etude_core::types::{Voice, Waveform};
