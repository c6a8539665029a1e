//! The metronome: a steady click at a configurable tempo.
//!
//! A dedicated thread owns the timing loop and is driven over a command
//! channel. Starting resets the 4-beat measure counter and schedules the
//! first tick one beat period out; every tick advances the counter,
//! pushes a click into the output mix (a higher pitch on the downbeat),
//! and broadcasts the beat to subscribers so a front end can pulse an
//! indicator. Stopping cancels the pending tick and resets the counter.
//!
//! Changing the tempo while running restarts the timing loop at the new
//! period - the measure counter resets and the next tick lands one full
//! new-period later. A tempo change while stopped just takes effect on
//! the next start.

use crate::audio::engine::EngineHandle;
use crate::audio::tone::ClickTone;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use etude_core::types::{beat_interval, Beat, MeasureCounter};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Click pitch on the accented first beat of the measure.
pub const DOWNBEAT_CLICK_HZ: f32 = 800.0;

/// Click pitch on the other beats.
pub const BEAT_CLICK_HZ: f32 = 600.0;

/// Commands that can be sent to the tick thread
#[derive(Debug)]
enum MetronomeCommand {
    Start,
    Stop,
    /// Tempo already stored atomically; tells a running loop to restart
    /// its phase at the new period.
    TempoChanged,
    AddSubscriber(Sender<Beat>),
    Shutdown,
}

/// Tempo-driven beat scheduler with start/stop control and an enabled
/// gate. See the module docs for the state machine.
pub struct Metronome {
    /// Tempo in BPM, shared with the tick thread
    tempo_bpm: Arc<AtomicU32>,
    /// Whether the tick loop is currently running
    running: Arc<AtomicBool>,
    /// Caller-side gate: when off, `start` is refused and a running
    /// loop is stopped
    enabled: AtomicBool,
    command_tx: Sender<MetronomeCommand>,
    thread: Option<JoinHandle<()>>,
}

impl Metronome {
    /// Create a metronome at the given tempo. `output` is where clicks
    /// are mixed; pass `None` to tick silently (headless use, tests).
    pub fn new(tempo_bpm: u32, output: Option<EngineHandle>) -> Self {
        let tempo = Arc::new(AtomicU32::new(tempo_bpm));
        let running = Arc::new(AtomicBool::new(false));
        let (command_tx, command_rx) = bounded(64);

        let tempo_clone = tempo.clone();
        let running_clone = running.clone();

        let thread = thread::spawn(move || {
            TickThread::new(tempo_clone, running_clone, command_rx, output).run();
        });

        Metronome {
            tempo_bpm: tempo,
            running,
            enabled: AtomicBool::new(true),
            command_tx,
            thread: Some(thread),
        }
    }

    /// Start ticking. Refused (quietly) while the metronome is
    /// disabled; otherwise the beat counter resets and the first tick
    /// lands one beat period from now.
    pub fn start(&self) {
        if !self.is_enabled() {
            log::debug!("metronome start ignored while disabled");
            return;
        }
        let _ = self.command_tx.send(MetronomeCommand::Start);
    }

    /// Stop ticking and reset the beat counter.
    pub fn stop(&self) {
        let _ = self.command_tx.send(MetronomeCommand::Stop);
    }

    /// Set the tempo in BPM. Takes effect immediately; if the metronome
    /// is running its phase restarts at the new period. Callers clamp
    /// to the selectable range first - any positive tempo is accepted
    /// here.
    pub fn set_tempo(&self, bpm: u32) {
        self.tempo_bpm.store(bpm, Ordering::Relaxed);
        let _ = self.command_tx.send(MetronomeCommand::TempoChanged);
    }

    /// Current tempo in BPM.
    pub fn tempo(&self) -> u32 {
        self.tempo_bpm.load(Ordering::Relaxed)
    }

    /// Milliseconds between ticks at the current tempo.
    pub fn tick_interval_ms(&self) -> u64 {
        etude_core::types::beat_interval_ms(self.tempo())
    }

    /// Flip the enabled gate. Disabling forces a stop; re-enabling does
    /// not resume - a fresh `start` is required.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            let _ = self.command_tx.send(MetronomeCommand::Stop);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Create a subscriber that receives every beat the metronome
    /// ticks. Multiple subscribers all see the same beats.
    pub fn subscribe(&self) -> Receiver<Beat> {
        let (tx, rx) = unbounded();
        let _ = self.command_tx.send(MetronomeCommand::AddSubscriber(tx));
        rx
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        let _ = self.command_tx.send(MetronomeCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Internal tick loop state, owned by the metronome thread
struct TickThread {
    tempo_bpm: Arc<AtomicU32>,
    running: Arc<AtomicBool>,
    command_rx: Receiver<MetronomeCommand>,
    output: Option<EngineHandle>,
    subscribers: Vec<Sender<Beat>>,
    counter: MeasureCounter,
    next_tick: Option<Instant>,
}

impl TickThread {
    fn new(
        tempo_bpm: Arc<AtomicU32>,
        running: Arc<AtomicBool>,
        command_rx: Receiver<MetronomeCommand>,
        output: Option<EngineHandle>,
    ) -> Self {
        Self {
            tempo_bpm,
            running,
            command_rx,
            output,
            subscribers: Vec::new(),
            counter: MeasureCounter::new(),
            next_tick: None,
        }
    }

    fn period(&self) -> Duration {
        beat_interval(self.tempo_bpm.load(Ordering::Relaxed).max(1))
    }

    fn run(&mut self) {
        loop {
            if self.running.load(Ordering::Relaxed) {
                // Non-blocking check for commands while running
                if let Ok(cmd) = self.command_rx.try_recv() {
                    if self.handle_command(cmd) {
                        break;
                    }
                    continue;
                }

                let now = Instant::now();
                match self.next_tick {
                    Some(target) if now >= target => {
                        self.tick();
                        self.next_tick = Some(target + self.period());
                    }
                    Some(target) => {
                        // Sleep most of the way, spin the last stretch
                        // for precision
                        let remaining = target - now;
                        if remaining > Duration::from_micros(500) {
                            thread::sleep(Duration::from_micros(100));
                        } else {
                            std::hint::spin_loop();
                        }
                    }
                    None => {
                        self.next_tick = Some(now + self.period());
                    }
                }
            } else {
                // Blocking wait for commands when stopped
                match self.command_rx.recv() {
                    Ok(cmd) => {
                        if self.handle_command(cmd) {
                            break;
                        }
                    }
                    Err(_) => break, // Channel closed
                }
            }
        }
    }

    /// Returns true on shutdown
    fn handle_command(&mut self, cmd: MetronomeCommand) -> bool {
        match cmd {
            MetronomeCommand::Start => {
                self.counter.reset();
                self.next_tick = Some(Instant::now() + self.period());
                self.running.store(true, Ordering::Relaxed);
            }
            MetronomeCommand::Stop => {
                self.running.store(false, Ordering::Relaxed);
                self.counter.reset();
                self.next_tick = None;
            }
            MetronomeCommand::TempoChanged => {
                // Restart, not drift-adjust: the counter resets and the
                // next tick is one new-period away
                if self.running.load(Ordering::Relaxed) {
                    self.counter.reset();
                    self.next_tick = Some(Instant::now() + self.period());
                }
            }
            MetronomeCommand::AddSubscriber(tx) => {
                self.subscribers.push(tx);
            }
            MetronomeCommand::Shutdown => {
                self.running.store(false, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    fn tick(&mut self) {
        let beat = self.counter.advance();

        if let Some(output) = &self.output {
            let frequency = if beat.is_downbeat {
                DOWNBEAT_CLICK_HZ
            } else {
                BEAT_CLICK_HZ
            };
            output.submit_click(ClickTone::new(frequency, output.sample_rate()));
        }

        // Broadcast to all subscribers, dropping disconnected ones
        self.subscribers.retain(|tx| tx.send(beat).is_ok());
    }
}
