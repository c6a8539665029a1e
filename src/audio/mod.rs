pub mod engine;
pub mod metronome;
pub mod synth;
pub mod tone;

// Re-export the pieces front ends actually hold
pub use engine::{AudioEngine, EngineHandle, MASTER_VOLUME};
pub use metronome::Metronome;
pub use synth::ToneSynthesizer;
