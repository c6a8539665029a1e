//! The built-in song library.
//!
//! Beginner pieces written against the C4-B5 keyboard range, used by
//! guided practice and the learn mode. Static in-memory data; lesson
//! content does not persist anywhere.

use std::fmt;

/// How hard a song is to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        write!(f, "{}", name)
    }
}

/// A song: an id for lookup, a display name, and its note sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Song {
    pub id: &'static str,
    pub name: &'static str,
    pub difficulty: Difficulty,
    pub notes: &'static [&'static str],
}

impl Song {
    /// Number of notes in the song.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The note expected at a play position, cycling back to the start
    /// past the end - feedback practice loops the song indefinitely.
    pub fn expected_note(&self, position: usize) -> &'static str {
        self.notes[position % self.notes.len()]
    }
}

static LIBRARY: [Song; 3] = [
    Song {
        id: "twinkle",
        name: "Twinkle Twinkle Little Star",
        difficulty: Difficulty::Beginner,
        notes: &[
            "C4", "C4", "G4", "G4", "A4", "A4", "G4", "F4", "F4", "E4", "E4", "D4", "D4", "C4",
        ],
    },
    Song {
        id: "happy",
        name: "Happy Birthday",
        difficulty: Difficulty::Beginner,
        notes: &["C4", "C4", "D4", "C4", "F4", "E4"],
    },
    Song {
        id: "mary",
        name: "Mary Had a Little Lamb",
        difficulty: Difficulty::Beginner,
        notes: &["E4", "D4", "C4", "D4", "E4", "E4", "E4"],
    },
];

/// All built-in songs.
pub fn library() -> &'static [Song] {
    &LIBRARY
}

/// Look up a song by id.
pub fn find_song(id: &str) -> Option<&'static Song> {
    LIBRARY.iter().find(|song| song.id == id)
}
