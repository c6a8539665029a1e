//! Practice sessions.
//!
//! Three ways to practice against the keyboard:
//!
//! - **free**: play anything, nothing is tracked
//! - **guided**: the selected song's keys are highlighted, presses are
//!   not judged
//! - **feedback**: presses are judged against the song in order (cycling
//!   past the end) and scored into [`PracticeStats`]
//!
//! The session is pure state - the caller plays the actual tone and then
//! feeds the press here.

use etude_core::types::{find_song, library, PracticeStats, Song};

/// The active practice mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PracticeMode {
    #[default]
    Free,
    Guided,
    Feedback,
}

impl PracticeMode {
    /// Parse a mode name (case-insensitive).
    pub fn from_name(name: &str) -> Option<PracticeMode> {
        match name.to_lowercase().as_str() {
            "free" => Some(PracticeMode::Free),
            "guided" => Some(PracticeMode::Guided),
            "feedback" => Some(PracticeMode::Feedback),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PracticeMode::Free => "free",
            PracticeMode::Guided => "guided",
            PracticeMode::Feedback => "feedback",
        }
    }
}

/// What a key press meant to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFeedback {
    /// Free or guided mode: nothing judged.
    Unjudged,
    /// Feedback mode: the press matched the expected note.
    Correct,
    /// Feedback mode: the press missed; carries the expected note.
    Wrong { expected: &'static str },
}

/// One practice sitting: a mode, a selected song, and the running stats.
pub struct PracticeSession {
    mode: PracticeMode,
    song: &'static Song,
    stats: PracticeStats,
}

impl PracticeSession {
    /// A fresh session: free mode on the first library song.
    pub fn new() -> Self {
        Self {
            mode: PracticeMode::Free,
            song: &library()[0],
            stats: PracticeStats::new(),
        }
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    /// Switch modes. Stats survive a mode switch; only selecting a song
    /// resets them.
    pub fn set_mode(&mut self, mode: PracticeMode) {
        self.mode = mode;
    }

    pub fn song(&self) -> &'static Song {
        self.song
    }

    /// Select a song by id, resetting the stats. Unknown ids leave the
    /// session untouched.
    pub fn select_song(&mut self, id: &str) -> Option<&'static Song> {
        let song = find_song(id)?;
        self.song = song;
        self.stats.reset();
        Some(song)
    }

    pub fn stats(&self) -> PracticeStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// The note feedback mode expects next.
    pub fn expected_note(&self) -> &'static str {
        self.song.expected_note(self.stats.total_notes as usize)
    }

    /// Feed one key press through the session.
    pub fn handle_key_press(&mut self, note: &str) -> KeyFeedback {
        if self.mode != PracticeMode::Feedback {
            return KeyFeedback::Unjudged;
        }

        let expected = self.expected_note();
        let correct = note == expected;
        self.stats.record(correct);

        if correct {
            KeyFeedback::Correct
        } else {
            KeyFeedback::Wrong { expected }
        }
    }

    /// Keys the front end should highlight: the whole song in guided
    /// mode, just the next expected note in feedback mode, nothing in
    /// free mode.
    pub fn highlighted_keys(&self) -> Vec<&'static str> {
        match self.mode {
            PracticeMode::Free => Vec::new(),
            PracticeMode::Guided => self.song.notes.to_vec(),
            PracticeMode::Feedback => vec![self.expected_note()],
        }
    }
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(PracticeMode::from_name("free"), Some(PracticeMode::Free));
        assert_eq!(PracticeMode::from_name("GUIDED"), Some(PracticeMode::Guided));
        assert_eq!(
            PracticeMode::from_name("feedback"),
            Some(PracticeMode::Feedback)
        );
        assert_eq!(PracticeMode::from_name("zen"), None);
    }

    #[test]
    fn test_free_mode_judges_nothing() {
        let mut session = PracticeSession::new();
        assert_eq!(session.handle_key_press("C4"), KeyFeedback::Unjudged);
        assert_eq!(session.stats().total_notes, 0);
        assert!(session.highlighted_keys().is_empty());
    }

    #[test]
    fn test_guided_mode_highlights_whole_song() {
        let mut session = PracticeSession::new();
        session.select_song("mary").unwrap();
        session.set_mode(PracticeMode::Guided);

        let keys = session.highlighted_keys();
        assert_eq!(keys.len(), session.song().len());
        assert_eq!(keys[0], "E4");
        assert_eq!(session.handle_key_press("C4"), KeyFeedback::Unjudged);
    }

    #[test]
    fn test_feedback_mode_scores_in_order() {
        let mut session = PracticeSession::new();
        session.select_song("mary").unwrap(); // E4 D4 C4 D4 E4 E4 E4
        session.set_mode(PracticeMode::Feedback);

        assert_eq!(session.highlighted_keys(), vec!["E4"]);
        assert_eq!(session.handle_key_press("E4"), KeyFeedback::Correct);
        assert_eq!(session.highlighted_keys(), vec!["D4"]);

        assert_eq!(
            session.handle_key_press("G4"),
            KeyFeedback::Wrong { expected: "D4" }
        );
        // A miss still advances the song position
        assert_eq!(session.highlighted_keys(), vec!["C4"]);

        let stats = session.stats();
        assert_eq!(stats.correct_notes, 1);
        assert_eq!(stats.total_notes, 2);
        assert_eq!(stats.accuracy, 50);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_feedback_cycles_past_the_end() {
        let mut session = PracticeSession::new();
        session.select_song("happy").unwrap(); // 6 notes
        session.set_mode(PracticeMode::Feedback);

        for _ in 0..6 {
            let expected = session.expected_note();
            assert_eq!(session.handle_key_press(expected), KeyFeedback::Correct);
        }
        // Past the end the song starts over
        assert_eq!(session.expected_note(), "C4");
        assert_eq!(session.stats().streak, 6);
    }

    #[test]
    fn test_selecting_a_song_resets_stats() {
        let mut session = PracticeSession::new();
        session.set_mode(PracticeMode::Feedback);
        session.handle_key_press("C4");
        assert_eq!(session.stats().total_notes, 1);

        session.select_song("twinkle").unwrap();
        assert_eq!(session.stats().total_notes, 0);

        assert!(session.select_song("unknown").is_none());
    }
}
