//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sim::RhythmState;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub points: u32,
    pub hits: u32,
    pub misses: u32,
    /// Seconds of play before the run ended
    pub survived_secs: f64,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

impl HighScoreEntry {
    /// Record of a run as it stands now
    pub fn from_run(state: &RhythmState, timestamp_ms: u64) -> Self {
        Self {
            points: state.points,
            hits: state.stats.hits,
            misses: state.stats.misses,
            survived_secs: state.clock,
            timestamp_ms,
        }
    }

    /// Fraction of judged arrows that were hit
    pub fn accuracy(&self) -> f32 {
        let judged = self.hits + self.misses;
        if judged == 0 {
            0.0
        } else {
            self.hits as f32 / judged as f32
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, points: u32) -> bool {
        if points == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| points > e.points).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, points: u32) -> Option<usize> {
        if !self.qualifies(points) {
            return None;
        }
        let rank = self.entries.iter().position(|e| points > e.points);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.points) {
            return None;
        }

        // Sorted descending by points; ties keep the older run first
        let pos = self.entries.iter().position(|e| entry.points > e.points);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.points)
    }

    /// Load the leaderboard; a missing file means no runs yet
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No high scores found, starting fresh");
            return Ok(Self::new());
        }
        let scores: HighScores = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn entry(points: u32) -> HighScoreEntry {
        HighScoreEntry {
            points,
            hits: points * 4,
            misses: 0,
            survived_secs: 60.0,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_sorted_insert() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(entry(5)), Some(1));
        assert_eq!(scores.add_score(entry(9)), Some(1));
        assert_eq!(scores.add_score(entry(7)), Some(2));
        assert_eq!(scores.add_score(entry(7)), Some(3));
        let points: Vec<u32> = scores.entries.iter().map(|e| e.points).collect();
        assert_eq!(points, vec![9, 7, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_full_board_truncates() {
        let mut scores = HighScores::new();
        for p in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(entry(p * 10));
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(entry(5)), None);
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(entry(55)), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.points), Some(20));
    }

    #[test]
    fn test_entry_from_run() {
        let mut state = RhythmState::new(Tuning::default(), 3);
        state.points = 4;
        state.stats.hits = 16;
        state.stats.misses = 2;
        state.clock = 12.5;

        let e = HighScoreEntry::from_run(&state, 1000);
        assert_eq!(e.points, 4);
        assert_eq!(e.hits, 16);
        assert_eq!(e.misses, 2);
        assert_eq!(e.survived_secs, 12.5);
        assert_eq!(e.timestamp_ms, 1000);
    }

    #[test]
    fn test_accuracy() {
        let mut e = entry(1);
        e.hits = 3;
        e.misses = 1;
        assert_eq!(e.accuracy(), 0.75);
        e.hits = 0;
        e.misses = 0;
        assert_eq!(e.accuracy(), 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "vintage_rhythm_scores_{}.json",
            std::process::id()
        ));
        let mut scores = HighScores::new();
        scores.add_score(entry(12));
        scores.save(&path).unwrap();

        let loaded = HighScores::load(&path).unwrap();
        assert_eq!(loaded.entries, scores.entries);
        let _ = std::fs::remove_file(&path);

        assert!(HighScores::load(&path).unwrap().is_empty());
    }
}
