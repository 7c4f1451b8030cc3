//! Persistent player progress
//!
//! High scores, the unlocked-level watermark, and lifetime stats. Each piece
//! is stored under its own key and loaded independently, so one corrupt blob
//! never takes the others down with it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::storage::KeyValueStore;

const HIGH_SCORES_KEY: &str = "tap_master_highscores";
const UNLOCKED_LEVELS_KEY: &str = "tap_master_unlocked_levels";
const STATS_KEY: &str = "tap_master_stats";

/// Best outcome recorded for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Score achieved
    pub score: u32,
    /// Seconds elapsed when the level was completed
    pub time_secs: u32,
}

/// Per-level best outcomes, keyed by level number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: BTreeMap<u32, HighScoreEntry>,
}

impl HighScores {
    pub fn get(&self, level: u32) -> Option<&HighScoreEntry> {
        self.entries.get(&level)
    }

    /// Record a completion if it beats the stored entry.
    ///
    /// Strictly-better-score wins; on equal score the faster completion wins.
    /// Returns whether the entry changed.
    pub fn update(&mut self, level: u32, score: u32, time_secs: u32) -> bool {
        let better = match self.entries.get(&level) {
            None => true,
            Some(prior) => {
                score > prior.score || (score == prior.score && time_secs < prior.time_secs)
            }
        };
        if better {
            self.entries.insert(level, HighScoreEntry { score, time_secs });
        }
        better
    }
}

/// Lifetime counters, accumulated at every level termination (win or loss)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_score: u64,
    pub total_balls_clicked: u64,
    pub total_time_played_secs: u64,
}

impl GlobalStats {
    /// Play time as "Xm Ys" for the stats screen
    pub fn play_time_display(&self) -> String {
        format!(
            "{}m {}s",
            self.total_time_played_secs / 60,
            self.total_time_played_secs % 60
        )
    }
}

/// Everything the progress store persists
#[derive(Debug, Clone)]
pub struct Progress {
    pub high_scores: HighScores,
    /// Highest level the player may start; only ever increases
    pub unlocked_levels: u32,
    pub stats: GlobalStats,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_scores: HighScores::default(),
            unlocked_levels: 1,
            stats: GlobalStats::default(),
        }
    }
}

impl Progress {
    /// Load all three keys, falling back to defaults per key on missing or
    /// malformed data.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let high_scores = match store.get(HIGH_SCORES_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("discarding corrupt high scores: {e}");
                HighScores::default()
            }),
            None => HighScores::default(),
        };
        let unlocked_levels = match store.get(UNLOCKED_LEVELS_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                log::warn!("discarding corrupt unlocked-levels value: {e}");
                1
            }),
            None => 1,
        };
        let stats = match store.get(STATS_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("discarding corrupt stats: {e}");
                GlobalStats::default()
            }),
            None => GlobalStats::default(),
        };
        log::info!(
            "loaded progress: {} high scores, {} levels unlocked",
            high_scores.entries.len(),
            unlocked_levels
        );
        Self {
            high_scores,
            unlocked_levels: unlocked_levels.clamp(1, MAX_LEVEL),
            stats,
        }
    }

    /// Raise the watermark after completing a level. Returns whether it moved.
    pub fn unlock_after(&mut self, completed_level: u32) -> bool {
        if completed_level >= self.unlocked_levels {
            self.unlocked_levels = (completed_level + 1).min(MAX_LEVEL);
            return true;
        }
        false
    }

    pub fn save_high_scores(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(&self.high_scores) {
            Ok(json) => store.set(HIGH_SCORES_KEY, &json),
            Err(e) => log::warn!("failed to serialize high scores: {e}"),
        }
    }

    pub fn save_unlocked_levels(&self, store: &mut dyn KeyValueStore) {
        store.set(UNLOCKED_LEVELS_KEY, &self.unlocked_levels.to_string());
    }

    pub fn save_stats(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(&self.stats) {
            Ok(json) => store.set(STATS_KEY, &json),
            Err(e) => log::warn!("failed to serialize stats: {e}"),
        }
    }

    /// Wipe all persisted keys and restore in-memory defaults. Irreversible;
    /// any confirmation prompt belongs to the presentation layer.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) {
        store.remove(HIGH_SCORES_KEY);
        store.remove(UNLOCKED_LEVELS_KEY);
        store.remove(STATS_KEY);
        *self = Self::default();
        log::info!("progress reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_high_score_update_rules() {
        let mut hs = HighScores::default();

        // First completion always records
        assert!(hs.update(3, 15, 20));
        assert_eq!(hs.get(3), Some(&HighScoreEntry { score: 15, time_secs: 20 }));

        // Equal score, faster time wins
        assert!(hs.update(3, 15, 16));
        assert_eq!(hs.get(3).unwrap().time_secs, 16);

        // Equal score, slower time loses
        assert!(!hs.update(3, 15, 25));
        assert_eq!(hs.get(3).unwrap().time_secs, 16);

        // Lower score never overwrites, even if faster
        assert!(!hs.update(3, 14, 1));
        assert_eq!(hs.get(3).unwrap().score, 15);

        // Higher score always overwrites
        assert!(hs.update(3, 16, 29));
        assert_eq!(hs.get(3), Some(&HighScoreEntry { score: 16, time_secs: 29 }));
    }

    #[test]
    fn test_unlock_watermark_monotonic() {
        let mut progress = Progress::default();
        assert!(progress.unlock_after(1));
        assert_eq!(progress.unlocked_levels, 2);

        // Replaying an already-cleared level does not move the watermark
        assert!(!progress.unlock_after(1));
        assert_eq!(progress.unlocked_levels, 2);

        // Capped at the last level
        assert!(progress.unlock_after(MAX_LEVEL));
        assert_eq!(progress.unlocked_levels, MAX_LEVEL);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = MemoryStore::new();
        let mut progress = Progress::default();
        progress.high_scores.update(1, 12, 18);
        progress.unlock_after(1);
        progress.stats.total_score = 12;
        progress.stats.total_balls_clicked = 14;
        progress.stats.total_time_played_secs = 18;

        progress.save_high_scores(&mut store);
        progress.save_unlocked_levels(&mut store);
        progress.save_stats(&mut store);

        let loaded = Progress::load(&store);
        assert_eq!(loaded.high_scores.get(1), progress.high_scores.get(1));
        assert_eq!(loaded.unlocked_levels, 2);
        assert_eq!(loaded.stats, progress.stats);
    }

    #[test]
    fn test_corrupt_keys_fall_back_independently() {
        let mut store = MemoryStore::new();
        let mut progress = Progress::default();
        progress.unlock_after(4);
        progress.save_unlocked_levels(&mut store);

        // Two corrupt blobs, one good key
        store.set("tap_master_highscores", "{not json");
        store.set("tap_master_stats", "[]");

        let loaded = Progress::load(&store);
        assert!(loaded.high_scores.entries.is_empty());
        assert_eq!(loaded.stats, GlobalStats::default());
        assert_eq!(loaded.unlocked_levels, 5);
    }

    #[test]
    fn test_reset_clears_store() {
        let mut store = MemoryStore::new();
        let mut progress = Progress::default();
        progress.high_scores.update(2, 20, 10);
        progress.unlock_after(2);
        progress.save_high_scores(&mut store);
        progress.save_unlocked_levels(&mut store);
        progress.save_stats(&mut store);

        progress.reset(&mut store);
        assert_eq!(progress.unlocked_levels, 1);
        assert!(progress.high_scores.entries.is_empty());
        assert_eq!(store.get("tap_master_highscores"), None);
        assert_eq!(store.get("tap_master_unlocked_levels"), None);
        assert_eq!(store.get("tap_master_stats"), None);
    }

    #[test]
    fn test_play_time_display() {
        let stats = GlobalStats {
            total_time_played_secs: 185,
            ..Default::default()
        };
        assert_eq!(stats.play_time_display(), "3m 5s");
    }
}
