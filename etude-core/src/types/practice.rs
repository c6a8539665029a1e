//! Practice scoring.

/// Running statistics for a feedback practice session.
///
/// `accuracy` is an integer percentage of correct presses over all
/// presses; `streak` counts consecutive correct presses and resets to
/// zero on a miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PracticeStats {
    pub correct_notes: u32,
    pub total_notes: u32,
    pub accuracy: u32,
    pub streak: u32,
}

impl PracticeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key press.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct_notes += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.total_notes += 1;
        self.accuracy =
            ((self.correct_notes as f32 / self.total_notes as f32) * 100.0).round() as u32;
    }

    /// Clear all counters, e.g. when a new song is selected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_are_zero() {
        let stats = PracticeStats::new();
        assert_eq!(stats.total_notes, 0);
        assert_eq!(stats.accuracy, 0);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_correct_press_updates_everything() {
        let mut stats = PracticeStats::new();
        stats.record(true);
        assert_eq!(stats.correct_notes, 1);
        assert_eq!(stats.total_notes, 1);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_miss_resets_streak_only() {
        let mut stats = PracticeStats::new();
        stats.record(true);
        stats.record(true);
        stats.record(false);

        assert_eq!(stats.correct_notes, 2);
        assert_eq!(stats.total_notes, 3);
        assert_eq!(stats.accuracy, 67); // 2/3 rounded
        assert_eq!(stats.streak, 0);

        stats.record(true);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn test_accuracy_rounds() {
        let mut stats = PracticeStats::new();
        stats.record(true);
        stats.record(false);
        stats.record(false);
        assert_eq!(stats.accuracy, 33); // 1/3 rounds down

        let mut stats = PracticeStats::new();
        stats.record(true);
        stats.record(true);
        stats.record(false);
        assert_eq!(stats.accuracy, 67); // 2/3 rounds up
    }

    #[test]
    fn test_reset() {
        let mut stats = PracticeStats::new();
        stats.record(true);
        stats.reset();
        assert_eq!(stats, PracticeStats::new());
    }
}
