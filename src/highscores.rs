//! High score leaderboard
//!
//! Keeps the top 10 finalized score records, highest first. Where the table is
//! stored is up to the caller; this module only offers a JSON codec.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::scoring::ScoreRecord;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScoreTable {
    entries: Vec<ScoreRecord>,
}

impl HighScoreTable {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would earn a place on the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Must beat the current 10th place outright
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a record, keeping the table sorted and capped.
    ///
    /// Equal scores keep insertion order. Returns the rank the record landed
    /// at, or None if it fell off the end.
    pub fn insert(&mut self, record: ScoreRecord) -> Option<usize> {
        let score = record.score;
        // Inserting after every equal score is the stable-sort position
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        self.entries.truncate(MAX_HIGH_SCORES);

        if pos < MAX_HIGH_SCORES {
            log::info!("High score {} placed #{}", score, pos + 1);
            Some(pos + 1)
        } else {
            None
        }
    }

    /// Records in rank order
    pub fn top_n(&self) -> &[ScoreRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Records set on the same major.minor release as `version`
    pub fn compatible_with(&self, version: &str) -> Result<Vec<&ScoreRecord>> {
        let current = parse_version(version)?;
        let mut compatible = Vec::new();
        for entry in &self.entries {
            let theirs = parse_version(&entry.game_version)?;
            if theirs.0 == current.0 && theirs.1 == current.1 {
                compatible.push(entry);
            }
        }
        Ok(compatible)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored table, restoring order and cap
    pub fn from_json(json: &str) -> Result<Self> {
        let mut table: HighScoreTable = serde_json::from_str(json)?;
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", table.entries.len());
        Ok(table)
    }
}

/// Parse `major.minor.patch`
pub fn parse_version(version: &str) -> Result<(u32, u32, u32)> {
    let invalid = || SimError::InvalidVersion(version.to_string());
    let mut parts = version.trim().split('.');
    let mut next = || -> Result<u32> {
        parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)
    };
    let parsed = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringRules;
    use crate::sim::DifficultyProfile;

    fn record(name: &str, score: u64) -> ScoreRecord {
        record_on(name, score, "0.3.0")
    }

    fn record_on(name: &str, score: u64, version: &str) -> ScoreRecord {
        ScoreRecord {
            player_name: name.to_string(),
            game_version: version.to_string(),
            flight_time: 30.0,
            fuel_remaining: 10.0,
            heat: 0.0,
            crashed: false,
            difficulty: DifficultyProfile::moon(),
            score,
            achievements: Vec::new(),
            timestamp: 0.0,
            rules: ScoringRules::Current,
        }
    }

    #[test]
    fn test_qualifies() {
        let mut table = HighScoreTable::new();
        assert!(!table.qualifies(0));
        assert!(table.qualifies(1));
        for i in 1..=10 {
            table.insert(record("p", i * 100));
        }
        assert!(!table.qualifies(100));
        assert!(table.qualifies(101));
        assert_eq!(table.potential_rank(1001), Some(1));
        assert_eq!(table.potential_rank(150), Some(10));
        assert_eq!(table.potential_rank(50), None);
    }

    #[test]
    fn test_insert_sorts_and_caps() {
        let mut table = HighScoreTable::new();
        let scores = [500, 1200, 300, 900, 50, 700, 1100, 200, 800, 600, 1000, 400];
        for (i, &s) in scores.iter().enumerate() {
            table.insert(record(&format!("p{}", i), s));
        }
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        let kept: Vec<u64> = table.top_n().iter().map(|r| r.score).collect();
        assert_eq!(kept, vec![1200, 1100, 1000, 900, 800, 700, 600, 500, 400, 300]);
        assert_eq!(table.top_score(), Some(1200));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut table = HighScoreTable::new();
        table.insert(record("first", 500));
        table.insert(record("high", 900));
        table.insert(record("second", 500));
        assert_eq!(table.insert(record("third", 500)), Some(4));
        let names: Vec<&str> = table.top_n().iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn test_insert_reports_rank() {
        let mut table = HighScoreTable::new();
        for _ in 0..10 {
            table.insert(record("p", 100));
        }
        assert_eq!(table.insert(record("low", 100)), None);
        assert_eq!(table.insert(record("top", 200)), Some(1));
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        assert!(table.top_n().iter().all(|r| r.player_name != "low"));
    }

    #[test]
    fn test_compatible_with_ignores_patch() {
        let mut table = HighScoreTable::new();
        table.insert(record_on("a", 300, "0.3.0"));
        table.insert(record_on("b", 200, "0.3.7"));
        table.insert(record_on("c", 100, "0.2.9"));
        let names: Vec<&str> = table
            .compatible_with("0.3.2")
            .unwrap()
            .iter()
            .map(|r| r.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(matches!(
            table.compatible_with("0.3"),
            Err(SimError::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.2.3").unwrap(), (1, 2, 3));
        assert!(parse_version("1.2.3.4").is_err());
        assert!(parse_version("1.x.3").is_err());
        assert!(parse_version("").is_err());
    }

    #[test]
    fn test_json_restores_invariants() {
        let mut table = HighScoreTable::new();
        table.insert(record("a", 10));
        table.insert(record("b", 30));
        let json = table.to_json().unwrap();
        let back = HighScoreTable::from_json(&json).unwrap();
        assert_eq!(back.top_n(), table.top_n());

        // Hand-edited: unsorted and over capacity
        let entries: Vec<ScoreRecord> = (0..12).map(|i| record("x", i)).collect();
        let json = serde_json::json!({ "entries": entries }).to_string();
        let loaded = HighScoreTable::from_json(&json).unwrap();
        assert_eq!(loaded.len(), MAX_HIGH_SCORES);
        assert_eq!(loaded.top_score(), Some(11));
        assert_eq!(loaded.top_n().last().map(|r| r.score), Some(2));
    }
}
