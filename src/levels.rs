//! Per-level difficulty parameters
//!
//! Pure closed-form mapping from level number to gameplay tuning. Configs are
//! never persisted; they are recomputed whenever a level starts. Callers are
//! responsible for keeping `level` within `[1, MAX_LEVEL]` - no clamping of
//! out-of-range input happens here.

use crate::consts::MAX_LEVEL;

/// Immutable tuning for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// Normal-ball taps required to complete the level
    pub goal: u32,
    /// Starting countdown in seconds
    pub time_limit_secs: u32,
    /// Ball speed in units per frame (velocity components drawn from +/- half)
    pub ball_speed: f32,
    /// Normal balls spawned at level start
    pub ball_count: u32,
    /// Milliseconds between hazard-spawner firings
    pub hazard_interval_ms: u32,
}

impl LevelConfig {
    /// Compute the config for a level.
    ///
    /// Every field is a monotonic function of `level`, capped so late levels
    /// plateau rather than becoming unwinnable.
    pub fn for_level(level: u32) -> Self {
        debug_assert!((1..=MAX_LEVEL).contains(&level));
        Self {
            goal: (10 + level * 3 / 2).min(30),
            time_limit_secs: 30u32.saturating_sub(level / 2).max(15),
            ball_speed: (3.0 + level as f32 * 0.8).min(12.0),
            ball_count: (3 + level / 2).min(8),
            hazard_interval_ms: (5000i64 - level as i64 * 300).max(2000) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_values() {
        let cfg = LevelConfig::for_level(1);
        assert_eq!(cfg.goal, 11);
        assert_eq!(cfg.time_limit_secs, 30);
        assert!((cfg.ball_speed - 3.8).abs() < 1e-6);
        assert_eq!(cfg.ball_count, 3);
        assert_eq!(cfg.hazard_interval_ms, 4700);
    }

    #[test]
    fn test_level_thirty_caps() {
        let cfg = LevelConfig::for_level(30);
        assert_eq!(cfg.goal, 30);
        assert_eq!(cfg.time_limit_secs, 15);
        assert!((cfg.ball_speed - 12.0).abs() < 1e-6);
        assert_eq!(cfg.ball_count, 8);
        assert_eq!(cfg.hazard_interval_ms, 2000);
    }

    #[test]
    fn test_closed_forms_all_levels() {
        for level in 1..=MAX_LEVEL {
            let cfg = LevelConfig::for_level(level);
            let expected_goal = ((10.0 + (level as f64 * 1.5).floor()) as u32).min(30);
            let expected_time = ((30.0 - (level as f64 * 0.5).floor()) as u32).max(15);
            let expected_interval = (5000 - level as i64 * 300).max(2000) as u32;
            assert_eq!(cfg.goal, expected_goal, "goal at level {level}");
            assert_eq!(cfg.time_limit_secs, expected_time, "time at level {level}");
            assert_eq!(cfg.hazard_interval_ms, expected_interval);
        }
    }

    proptest! {
        #[test]
        fn prop_monotonic_difficulty(level in 1u32..MAX_LEVEL) {
            let a = LevelConfig::for_level(level);
            let b = LevelConfig::for_level(level + 1);
            prop_assert!(b.goal >= a.goal);
            prop_assert!(b.time_limit_secs <= a.time_limit_secs);
            prop_assert!(b.ball_speed >= a.ball_speed);
            prop_assert!(b.ball_count >= a.ball_count);
            prop_assert!(b.hazard_interval_ms <= a.hazard_interval_ms);
        }

        #[test]
        fn prop_values_in_range(level in 1u32..=MAX_LEVEL) {
            let cfg = LevelConfig::for_level(level);
            prop_assert!((11..=30).contains(&cfg.goal));
            prop_assert!((15..=30).contains(&cfg.time_limit_secs));
            prop_assert!(cfg.ball_speed >= 3.8 && cfg.ball_speed <= 12.0);
            prop_assert!((3..=8).contains(&cfg.ball_count));
            prop_assert!((2000..=4700).contains(&cfg.hazard_interval_ms));
        }
    }
}
