//! The shared audio output stage.
//!
//! One cpal output stream per engine. Playing code never touches the
//! stream directly: it submits [`EnvelopedTone`]s and [`ClickTone`]s
//! through an [`EngineHandle`], and the stream callback sums whatever is
//! live, applies the master volume, and drops generators that have
//! finished. Submitted sounds always play to completion - there is no
//! cancellation path short of closing the engine.

use crate::audio::tone::{ClickTone, EnvelopedTone};
use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

/// Fixed master volume applied to the summed mix before output.
pub const MASTER_VOLUME: f32 = 0.3;

/// Everything the output callback reads: the live generators and the
/// master volume. Protected by a mutex; the callback holds it only for
/// the duration of one buffer.
struct MixerState {
    tones: Vec<EnvelopedTone>,
    clicks: Vec<ClickTone>,
    master_volume: f32,
    /// False once the stream is torn down; submissions to a closed
    /// mixer are dropped (nothing would ever drain them)
    open: bool,
}

impl MixerState {
    fn new() -> Self {
        Self {
            tones: Vec::new(),
            clicks: Vec::new(),
            master_volume: MASTER_VOLUME,
            open: true,
        }
    }
}

/// Cloneable, thread-safe handle for submitting sounds to the mixer.
#[derive(Clone)]
pub struct EngineHandle {
    state: Arc<Mutex<MixerState>>,
    sample_rate: f32,
}

impl EngineHandle {
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Add a note to the mix. It starts on the next output buffer and
    /// runs for its full duration.
    pub fn submit_tone(&self, tone: EnvelopedTone) {
        if let Ok(mut state) = self.state.lock() {
            if state.open {
                state.tones.push(tone);
            }
        }
    }

    /// Add a metronome click to the mix.
    pub fn submit_click(&self, click: ClickTone) {
        if let Ok(mut state) = self.state.lock() {
            if state.open {
                state.clicks.push(click);
            }
        }
    }

    /// Set the master volume (clamped to 0.0-1.0).
    pub fn set_master_volume(&self, volume: f32) {
        if let Ok(mut state) = self.state.lock() {
            state.master_volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn master_volume(&self) -> f32 {
        self.state
            .lock()
            .map(|state| state.master_volume)
            .unwrap_or(MASTER_VOLUME)
    }

    /// Number of notes still sounding (clicks not included).
    pub fn active_tone_count(&self) -> usize {
        self.state.lock().map(|state| state.tones.len()).unwrap_or(0)
    }
}

/// The cpal-backed output stage. Owns the stream; [`close`] tears it
/// down and is safe to call more than once.
///
/// [`close`]: AudioEngine::close
pub struct AudioEngine {
    stream: Option<Stream>,
    handle: EngineHandle,
}

impl AudioEngine {
    /// Open the default output device and start the (initially silent)
    /// output stream.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device.default_output_config()?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();

        let handle = EngineHandle {
            state: Arc::new(Mutex::new(MixerState::new())),
            sample_rate: config.sample_rate.0 as f32,
        };

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, handle.clone())?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, handle.clone())?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, handle.clone())?,
            _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
        };

        stream
            .play()
            .map_err(|e| anyhow!("Failed to start output stream: {}", e))?;

        Ok(AudioEngine {
            stream: Some(stream),
            handle,
        })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        handle: EngineHandle,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
    {
        let channels = config.channels as usize;

        let err_fn = |err| log::error!("output audio stream error: {:?}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let mut state = match handle.state.lock() {
                        Ok(state) => state,
                        Err(_) => return,
                    };

                    for frame in data.chunks_mut(channels) {
                        let mut summed = 0.0f32;
                        for tone in state.tones.iter_mut() {
                            summed += tone.next_sample();
                        }
                        for click in state.clicks.iter_mut() {
                            summed += click.next_sample();
                        }

                        let value: T =
                            cpal::Sample::from_sample(summed * state.master_volume);
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }

                    state.tones.retain(|tone| !tone.is_finished());
                    state.clicks.retain(|click| !click.is_finished());
                },
                err_fn,
                None,
            )
            .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

        Ok(stream)
    }

    /// A handle other threads can use to feed the mixer.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Whether the output stream is still up.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Tear down the output stream. Anything still in the mix is
    /// silenced and further submissions are dropped. Safe to call
    /// repeatedly.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            if let Ok(mut state) = self.handle.state.lock() {
                state.open = false;
                state.tones.clear();
                state.clicks.clear();
            }
            log::debug!("audio output closed");
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etude_core::types::{EnvelopeParams, Waveform};

    #[test]
    fn test_engine_creation() {
        // This test may fail on systems without audio devices
        match AudioEngine::new() {
            Ok(engine) => {
                assert!(engine.is_open());
                assert_eq!(engine.handle().master_volume(), MASTER_VOLUME);
            }
            Err(_) => {
                println!("AudioEngine creation failed - likely no audio device available");
            }
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        if let Ok(mut engine) = AudioEngine::new() {
            engine.close();
            assert!(!engine.is_open());
            engine.close();
            assert!(!engine.is_open());
        }
    }

    #[test]
    fn test_handle_accepts_tones() {
        if let Ok(engine) = AudioEngine::new() {
            let handle = engine.handle();
            handle.submit_tone(EnvelopedTone::new(
                440.0,
                Waveform::Sine,
                EnvelopeParams::note_default(),
                0.05,
                handle.sample_rate(),
            ));
            assert!(handle.active_tone_count() <= 1);
        }
    }

    #[test]
    fn test_volume_clamped() {
        if let Ok(engine) = AudioEngine::new() {
            let handle = engine.handle();
            handle.set_master_volume(2.0);
            assert_eq!(handle.master_volume(), 1.0);
            handle.set_master_volume(-0.5);
            assert_eq!(handle.master_volume(), 0.0);
        }
    }
}
