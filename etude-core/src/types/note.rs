//! The two-octave key range of the practice keyboard.
//!
//! Frequencies are fixed 12-tone equal temperament values based on
//! A4 = 440 Hz, covering C4 through B5 - the range every lesson and song
//! in the library is written against.

/// Frequency returned for any name outside the keyboard range.
pub const FALLBACK_FREQUENCY: f32 = 440.0;

/// Number of keys on the practice keyboard (two octaves, C4–B5).
pub const KEY_COUNT: usize = 24;

/// Keyboard keys in ascending pitch order with their frequencies in Hz.
static KEYS: [(&str, f32); KEY_COUNT] = [
    ("C4", 261.63),
    ("C#4", 277.18),
    ("D4", 293.66),
    ("D#4", 311.13),
    ("E4", 329.63),
    ("F4", 349.23),
    ("F#4", 369.99),
    ("G4", 392.00),
    ("G#4", 415.30),
    ("A4", 440.00),
    ("A#4", 466.16),
    ("B4", 493.88),
    ("C5", 523.25),
    ("C#5", 554.37),
    ("D5", 587.33),
    ("D#5", 622.25),
    ("E5", 659.25),
    ("F5", 698.46),
    ("F#5", 739.99),
    ("G5", 783.99),
    ("G#5", 830.61),
    ("A5", 880.00),
    ("A#5", 932.33),
    ("B5", 987.77),
];

/// Resolve a key name to its frequency in Hz.
///
/// Total and pure: names outside the keyboard range resolve to
/// [`FALLBACK_FREQUENCY`] rather than an error.
pub fn key_frequency(name: &str) -> f32 {
    KEYS.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, freq)| *freq)
        .unwrap_or(FALLBACK_FREQUENCY)
}

/// Check whether a name is one of the 24 keyboard keys.
pub fn is_known_key(name: &str) -> bool {
    KEYS.iter().any(|(key, _)| *key == name)
}

/// Check whether a key name denotes a black key (a sharp).
pub fn is_black_key(name: &str) -> bool {
    name.contains('#')
}

/// All key names in ascending pitch order.
pub fn key_names() -> impl Iterator<Item = &'static str> {
    KEYS.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_frequencies() {
        let expected = [
            ("C4", 261.63),
            ("C#4", 277.18),
            ("D4", 293.66),
            ("D#4", 311.13),
            ("E4", 329.63),
            ("F4", 349.23),
            ("F#4", 369.99),
            ("G4", 392.00),
            ("G#4", 415.30),
            ("A4", 440.00),
            ("A#4", 466.16),
            ("B4", 493.88),
            ("C5", 523.25),
            ("C#5", 554.37),
            ("D5", 587.33),
            ("D#5", 622.25),
            ("E5", 659.25),
            ("F5", 698.46),
            ("F#5", 739.99),
            ("G5", 783.99),
            ("G#5", 830.61),
            ("A5", 880.00),
            ("A#5", 932.33),
            ("B5", 987.77),
        ];
        for (name, freq) in expected {
            assert_eq!(key_frequency(name), freq, "{}", name);
        }
    }

    #[test]
    fn test_every_key_resolves() {
        for name in key_names() {
            let freq = key_frequency(name);
            assert!(freq > 0.0, "{} has no frequency", name);
            // Only A4 may coincide with the fallback value
            if name != "A4" {
                assert_ne!(freq, FALLBACK_FREQUENCY, "{} collides with fallback", name);
            }
        }
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(key_frequency("Z9"), 440.00);
        assert_eq!(key_frequency(""), 440.00);
        assert_eq!(key_frequency("C6"), 440.00); // Out of range
    }

    #[test]
    fn test_key_count_and_order() {
        let names: Vec<_> = key_names().collect();
        assert_eq!(names.len(), KEY_COUNT);
        assert_eq!(names.first(), Some(&"C4"));
        assert_eq!(names.last(), Some(&"B5"));

        // Frequencies ascend with pitch
        let freqs: Vec<f32> = names.iter().map(|n| key_frequency(n)).collect();
        for pair in freqs.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_octave_doubling() {
        // The fifth octave sits one octave above the fourth
        assert!((key_frequency("C5") - 2.0 * key_frequency("C4")).abs() < 0.02);
        assert!((key_frequency("A5") - 2.0 * key_frequency("A4")).abs() < 0.01);
    }

    #[test]
    fn test_black_key_classification() {
        assert!(is_black_key("C#4"));
        assert!(is_black_key("A#5"));
        assert!(!is_black_key("C4"));
        assert!(!is_black_key("B5"));

        let black_count = key_names().filter(|n| is_black_key(n)).count();
        assert_eq!(black_count, 10); // Five sharps per octave
    }

    #[test]
    fn test_known_key_lookup() {
        assert!(is_known_key("G#4"));
        assert!(!is_known_key("G#6"));
        assert!(!is_known_key("H4"));
    }
}
