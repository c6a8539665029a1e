//! Learn mode: play along with a song as its notes fall.
//!
//! A [`SongPlayer`](player::SongPlayer) emits one note-due event per
//! beat interval; each event spawns a [`FallingNote`] here and
//! highlights the key to hit. Presses are judged against the song in
//! order, 10 points apiece, until the cursor passes the last note.
//!
//! Falling-note animation state is deliberately timer-free: every note
//! stores only its spawn instant, and positions are re-derived from
//! elapsed time whenever a frame is drawn. One repaint cadence serves
//! all notes; there is no per-note timer to leak or drift.

pub mod player;

pub use player::{PlayerEvent, SongPlayer};

use etude_core::types::Song;
use std::time::{Duration, Instant};

/// How long a note takes to fall from top to bottom.
pub const FALL_SECONDS: f32 = 4.0;

/// Points for each correctly played note.
pub const POINTS_PER_NOTE: u32 = 10;

/// Fraction of the fall completed after `elapsed` time, saturating at
/// 1.0 (fully fallen).
pub fn fall_progress(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / FALL_SECONDS).min(1.0)
}

/// One on-screen falling note.
#[derive(Debug, Clone, Copy)]
pub struct FallingNote {
    pub id: u64,
    pub note: &'static str,
    pub spawned_at: Instant,
}

impl FallingNote {
    /// Position of this note at `now`, 0.0 (top) to 1.0 (bottom).
    pub fn progress(&self, now: Instant) -> f32 {
        fall_progress(now.saturating_duration_since(self.spawned_at))
    }

    /// Whether the note has fully fallen and can be swept away.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// What a key press meant to the learn session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnFeedback {
    /// Not currently playing; the press is ignored.
    Idle,
    /// Matched the expected note; carries the new score.
    Correct { score: u32 },
    /// Missed; carries the note that was expected.
    Wrong { expected: &'static str },
    /// Matched the final note; carries the final score.
    Completed { score: u32 },
}

/// One run through a song in learn mode.
pub struct LearnSession {
    song: &'static Song,
    cursor: usize,
    score: u32,
    playing: bool,
    notes: Vec<FallingNote>,
    next_note_id: u64,
}

impl LearnSession {
    pub fn new(song: &'static Song) -> Self {
        Self {
            song,
            cursor: 0,
            score: 0,
            playing: true,
            notes: Vec::new(),
            next_note_id: 0,
        }
    }

    pub fn song(&self) -> &'static Song {
        self.song
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The note the player should hit next, or `None` once the song is
    /// done.
    pub fn expected_note(&self) -> Option<&'static str> {
        self.song.notes.get(self.cursor).copied()
    }

    /// Percentage of the song completed, rounded.
    pub fn progress_percent(&self) -> u32 {
        ((self.cursor as f32 / self.song.len() as f32) * 100.0).round() as u32
    }

    /// Spawn a falling note (called as the player announces each note).
    pub fn spawn_note(&mut self, note: &'static str, now: Instant) {
        let id = self.next_note_id;
        self.next_note_id += 1;
        self.notes.push(FallingNote {
            id,
            note,
            spawned_at: now,
        });
    }

    /// Drop notes that have finished falling.
    pub fn sweep_expired(&mut self, now: Instant) {
        self.notes.retain(|note| !note.is_expired(now));
    }

    /// Current positions of all live notes, derived from elapsed time.
    pub fn positions(&self, now: Instant) -> Vec<(&'static str, f32)> {
        self.notes
            .iter()
            .map(|note| (note.note, note.progress(now)))
            .collect()
    }

    /// End the run early (e.g. the player stopped the song).
    pub fn finish(&mut self) {
        self.playing = false;
    }

    /// Judge one key press.
    pub fn handle_key_press(&mut self, note: &str) -> LearnFeedback {
        if !self.playing {
            return LearnFeedback::Idle;
        }

        let Some(expected) = self.expected_note() else {
            return LearnFeedback::Idle;
        };

        if note != expected {
            return LearnFeedback::Wrong { expected };
        }

        self.score += POINTS_PER_NOTE;
        self.cursor += 1;

        if self.cursor >= self.song.len() {
            self.playing = false;
            LearnFeedback::Completed { score: self.score }
        } else {
            LearnFeedback::Correct { score: self.score }
        }
    }
}
