//! Tap Master - a tap-the-targets reflex game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (session state machine, ball motion, timers)
//! - `levels`: Closed-form per-level difficulty parameters
//! - `progress`: Persistent high scores, unlocked levels, and global stats
//! - `storage`: Injected key-value persistence seam
//! - `events`: Discrete state-change events for the presentation layer
//! - `audio`: Fire-and-forget sound effect sink

pub mod audio;
pub mod events;
pub mod levels;
pub mod progress;
pub mod sim;
pub mod storage;

pub use audio::{AudioSink, NullAudio, SoundEffect};
pub use events::GameEvent;
pub use levels::LevelConfig;
pub use progress::{GlobalStats, HighScoreEntry, HighScores, Progress};
pub use sim::{Ball, BallKind, PlayArea, Session, SessionPhase, SessionState};
pub use storage::{KeyValueStore, MemoryStore};

/// Game configuration constants
pub mod consts {
    /// Highest playable level
    pub const MAX_LEVEL: u32 = 30;

    /// Ball diameter in play-area units
    pub const BALL_SIZE: f32 = 60.0;
    /// Inset from the play-area edges when choosing spawn positions
    pub const SPAWN_PADDING: f32 = 20.0;
    /// How long a hazard ball stays on the field before auto-removal
    pub const HAZARD_LIFETIME_MS: f32 = 2000.0;

    /// Countdown driver cadence (one second per firing)
    pub const COUNTDOWN_INTERVAL_MS: f32 = 1000.0;
    /// Nominal motion frame at 60 Hz; velocities are in units per frame
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Seconds gained by tapping a time-bonus ball
    pub const TIME_BONUS_SECS: u32 = 5;
    /// Seconds lost by tapping a time-penalty ball
    pub const TIME_PENALTY_SECS: u32 = 3;

    /// Chance that a hazard-spawner firing actually produces a hazard
    pub const HAZARD_SPAWN_CHANCE: f64 = 0.7;
    /// Replacement draws above this threshold become bonus/penalty balls
    pub const SPECIAL_BALL_THRESHOLD: f64 = 0.7;

    /// Default play-area dimensions
    pub const PLAY_AREA_WIDTH: f32 = 800.0;
    pub const PLAY_AREA_HEIGHT: f32 = 600.0;
}
