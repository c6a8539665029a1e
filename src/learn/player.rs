//! Timed song playback for learn mode.
//!
//! A persistent thread steps through a song's notes, announcing one per
//! beat interval at the requested tempo. Consumers receive the
//! announcements over a channel and decide what to do with them (spawn
//! a falling note, print a prompt). The player never synthesizes sound
//! itself - in learn mode it is the player's fingers, not the engine,
//! that make the notes.

use anyhow::Result;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use etude_core::types::{beat_interval, Song};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Commands that can be sent to the player thread
#[derive(Debug)]
enum PlayerCommand {
    Play { song: &'static Song, tempo_bpm: u32 },
    Stop,
    Shutdown,
}

/// Announcements the player emits while a song runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The next note of the song is due now.
    NoteDue {
        index: usize,
        note: &'static str,
    },
    /// The song has been fully announced.
    Finished { song_id: &'static str },
}

/// Handle to the playback thread.
pub struct SongPlayer {
    command_tx: Sender<PlayerCommand>,
    is_playing: Arc<AtomicBool>,
    _thread: JoinHandle<()>,
}

impl SongPlayer {
    /// Spawn the player thread. Returns the handle and the event
    /// receiver; all events from every song played go to the same
    /// receiver.
    pub fn new() -> (Self, Receiver<PlayerEvent>) {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = unbounded();
        let is_playing = Arc::new(AtomicBool::new(false));
        let is_playing_clone = is_playing.clone();

        let thread = thread::spawn(move || {
            PlayerLoop::new(command_rx, event_tx, is_playing_clone).run();
        });

        (
            SongPlayer {
                command_tx,
                is_playing,
                _thread: thread,
            },
            event_rx,
        )
    }

    /// Start announcing a song at the given tempo. Interrupts whatever
    /// is currently playing.
    pub fn play(&self, song: &'static Song, tempo_bpm: u32) -> Result<()> {
        self.command_tx
            .send(PlayerCommand::Play { song, tempo_bpm })
            .map_err(|e| anyhow::anyhow!("Failed to send command: {}", e))
    }

    /// Stop the current song.
    pub fn stop(&self) -> Result<()> {
        self.command_tx
            .send(PlayerCommand::Stop)
            .map_err(|e| anyhow::anyhow!("Failed to send command: {}", e))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::Relaxed)
    }
}

impl Drop for SongPlayer {
    fn drop(&mut self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
    }
}

/// Internal playback loop that runs in a dedicated thread
struct PlayerLoop {
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<PlayerEvent>,
    is_playing: Arc<AtomicBool>,

    current: Option<(&'static Song, u32)>,
    note_index: usize,
}

enum LoopAction {
    Continue,
    Shutdown,
}

impl PlayerLoop {
    fn new(
        command_rx: Receiver<PlayerCommand>,
        event_tx: Sender<PlayerEvent>,
        is_playing: Arc<AtomicBool>,
    ) -> Self {
        Self {
            command_rx,
            event_tx,
            is_playing,
            current: None,
            note_index: 0,
        }
    }

    fn run(&mut self) {
        loop {
            if self.current.is_some() {
                if let LoopAction::Shutdown = self.drain_commands() {
                    break;
                }
                self.announce_next_note();
            } else {
                // Idle - block until a command arrives
                match self.command_rx.recv() {
                    Ok(cmd) => {
                        if let LoopAction::Shutdown = self.handle_command(cmd) {
                            break;
                        }
                    }
                    Err(_) => break, // Channel closed
                }
            }
        }

        self.is_playing.store(false, Ordering::Relaxed);
    }

    fn drain_commands(&mut self) -> LoopAction {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => {
                    if let LoopAction::Shutdown = self.handle_command(cmd) {
                        return LoopAction::Shutdown;
                    }
                }
                Err(TryRecvError::Empty) => return LoopAction::Continue,
                Err(TryRecvError::Disconnected) => return LoopAction::Shutdown,
            }
        }
    }

    fn handle_command(&mut self, cmd: PlayerCommand) -> LoopAction {
        match cmd {
            PlayerCommand::Play { song, tempo_bpm } => {
                self.current = Some((song, tempo_bpm));
                self.note_index = 0;
                self.is_playing.store(true, Ordering::Relaxed);
            }
            PlayerCommand::Stop => {
                self.current = None;
                self.note_index = 0;
                self.is_playing.store(false, Ordering::Relaxed);
            }
            PlayerCommand::Shutdown => return LoopAction::Shutdown,
        }
        LoopAction::Continue
    }

    fn announce_next_note(&mut self) {
        let Some((song, tempo_bpm)) = self.current else {
            return;
        };

        if self.note_index >= song.len() {
            let _ = self.event_tx.send(PlayerEvent::Finished { song_id: song.id });
            self.current = None;
            self.note_index = 0;
            self.is_playing.store(false, Ordering::Relaxed);
            return;
        }

        let _ = self.event_tx.send(PlayerEvent::NoteDue {
            index: self.note_index,
            note: song.notes[self.note_index],
        });
        self.note_index += 1;

        // One beat between announcements, checking for commands so a
        // stop lands mid-wait
        let due = Instant::now() + beat_interval(tempo_bpm.max(1));
        self.wait_until_with_command_check(due);
    }

    /// Wait until a specific time, but check for commands periodically
    fn wait_until_with_command_check(&mut self, target: Instant) {
        while Instant::now() < target {
            match self.command_rx.try_recv() {
                Ok(PlayerCommand::Stop) => {
                    self.current = None;
                    self.note_index = 0;
                    self.is_playing.store(false, Ordering::Relaxed);
                    return;
                }
                Ok(PlayerCommand::Shutdown) => {
                    // Re-queue shutdown handling by clearing state; the
                    // main loop sees the closed/idle state next pass
                    self.current = None;
                    self.is_playing.store(false, Ordering::Relaxed);
                    return;
                }
                Ok(PlayerCommand::Play { song, tempo_bpm }) => {
                    // Immediate switch even mid-beat
                    self.current = Some((song, tempo_bpm));
                    self.note_index = 0;
                    self.is_playing.store(true, Ordering::Relaxed);
                    return;
                }
                Err(_) => {}
            }

            // Small sleep for responsiveness
            thread::sleep(std::time::Duration::from_millis(5));
        }
    }
}
