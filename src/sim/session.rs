//! Session state machine
//!
//! Orchestrates level start, tap handling, terminal transitions, and
//! persistence. Phases run `Idle -> Playing -> {Completed, Over}`; both
//! terminal phases rest until the next `start_game`.
//!
//! Everything happens on one logical thread: taps and timer firings mutate the
//! state through `&mut self`, so no two transitions can interleave. A terminal
//! transition disarms all periodic drivers in the same call that flips the
//! phase, which makes any later tap or tick a safe no-op.

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::events::GameEvent;
use crate::levels::LevelConfig;
use crate::progress::{HighScoreEntry, Progress};
use crate::sim::state::{Ball, BallKind, PlayArea, SessionPhase, SessionState};
use crate::storage::KeyValueStore;

/// One player session: live state plus the injected persistence/audio seams
pub struct Session {
    pub(crate) state: SessionState,
    pub(crate) progress: Progress,
    /// Config of the current level, recomputed at every `start_game`
    pub(crate) config: LevelConfig,
    pub(crate) area: PlayArea,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) audio: Box<dyn AudioSink>,
    pub(crate) events: Vec<GameEvent>,
}

impl Session {
    /// Create a session, loading persisted progress from the store.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioSink>,
        area: PlayArea,
        seed: u64,
    ) -> Self {
        let progress = Progress::load(store.as_ref());
        Self {
            state: SessionState::new(seed),
            progress,
            config: LevelConfig::for_level(1),
            area,
            store,
            audio,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Config of the level currently loaded into the session
    pub fn config(&self) -> LevelConfig {
        self.config
    }

    pub fn unlocked_levels(&self) -> u32 {
        self.progress.unlocked_levels
    }

    pub fn high_score(&self, level: u32) -> Option<&HighScoreEntry> {
        self.progress.high_scores.get(level)
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a level. Rejected (no transition) unless
    /// `1 <= level <= unlocked_levels`. Returns whether play started.
    pub fn start_game(&mut self, level: u32) -> bool {
        if level == 0 || level > self.progress.unlocked_levels {
            log::warn!(
                "rejected start of level {level} (unlocked: {})",
                self.progress.unlocked_levels
            );
            return false;
        }

        let cfg = LevelConfig::for_level(level);
        for ball in std::mem::take(&mut self.state.balls) {
            self.events.push(GameEvent::BallRemoved { id: ball.id });
        }
        self.state.level = level;
        self.state.score = 0;
        self.state.goal_progress = 0;
        self.state.time_left = cfg.time_limit_secs;
        self.state.phase = SessionPhase::Playing;
        self.state.drivers.arm(level > 1);
        self.config = cfg;

        for _ in 0..cfg.ball_count {
            self.spawn_and_emit(BallKind::Normal);
        }
        self.events.push(GameEvent::ScoreChanged {
            score: 0,
            goal_progress: 0,
        });
        self.events.push(GameEvent::TimeChanged {
            time_left: self.state.time_left,
        });

        log::info!(
            "level {level} started: goal {}, {}s, {} balls",
            cfg.goal,
            cfg.time_limit_secs,
            cfg.ball_count
        );
        true
    }

    /// Restart the current level.
    pub fn retry_level(&mut self) -> bool {
        self.start_game(self.state.level)
    }

    /// Advance to the next level, or do nothing past the last one.
    pub fn next_level(&mut self) -> bool {
        if self.state.level < MAX_LEVEL {
            self.start_game(self.state.level + 1)
        } else {
            log::debug!("already at the last level");
            false
        }
    }

    /// Handle a tap on a ball. Outside `Playing`, or for a ball that no
    /// longer exists, this is a silent no-op - double-tap races resolve on
    /// whichever tap removes the ball first.
    pub fn tap(&mut self, ball_id: u32) {
        if !self.state.is_playing() {
            return;
        }
        let Some(ball) = self.state.balls.iter().find(|b| b.id == ball_id).copied() else {
            return;
        };

        match ball.kind {
            BallKind::Normal => {
                self.state.score += 1;
                self.state.goal_progress += 1;
                self.events.push(GameEvent::ScoreChanged {
                    score: self.state.score,
                    goal_progress: self.state.goal_progress,
                });
                self.audio.play(SoundEffect::TapNormal);
            }
            BallKind::TimeBonus => {
                self.state.time_left =
                    (self.state.time_left + TIME_BONUS_SECS).min(self.config.time_limit_secs);
                self.events.push(GameEvent::TimeChanged {
                    time_left: self.state.time_left,
                });
                self.audio.play(SoundEffect::TapBonus);
            }
            BallKind::TimePenalty => {
                self.state.time_left = self.state.time_left.saturating_sub(TIME_PENALTY_SECS);
                self.events.push(GameEvent::TimeChanged {
                    time_left: self.state.time_left,
                });
                self.audio.play(SoundEffect::TapPenalty);
            }
            BallKind::Hazard => {
                self.game_over("hazard tapped");
                return;
            }
        }

        self.progress.stats.total_balls_clicked += 1;
        self.state.remove_ball(ball_id);
        self.events.push(GameEvent::BallRemoved { id: ball_id });

        let replacement = self.draw_replacement_kind();
        self.spawn_and_emit(replacement);
        self.ensure_normal_ball();

        if self.state.goal_progress >= self.config.goal {
            self.level_complete();
        }
    }

    /// Leave the level without finishing it (navigation away). Cancels the
    /// drivers; no stats are accumulated.
    pub fn abandon(&mut self) {
        if self.state.is_playing() {
            log::debug!("level {} abandoned", self.state.level);
        }
        self.state.drivers.disarm();
        self.state.phase = SessionPhase::Idle;
    }

    /// Wipe persisted progress and restore defaults.
    pub fn reset_progress(&mut self) {
        self.progress.reset(self.store.as_mut());
    }

    /// Category for the ball replacing a tapped one: mostly Normal, sometimes
    /// a 50/50 bonus-or-penalty. Thresholds are fixed, not level-scaled.
    fn draw_replacement_kind(&mut self) -> BallKind {
        use rand::Rng;
        if self.state.rng.random::<f64>() > SPECIAL_BALL_THRESHOLD {
            if self.state.rng.random::<f64>() > 0.5 {
                BallKind::TimeBonus
            } else {
                BallKind::TimePenalty
            }
        } else {
            BallKind::Normal
        }
    }

    /// At least one Normal ball must be on the field at all times.
    fn ensure_normal_ball(&mut self) {
        if !self.state.has_normal_ball() {
            self.spawn_and_emit(BallKind::Normal);
        }
    }

    pub(crate) fn spawn_and_emit(&mut self, kind: BallKind) -> Ball {
        let ball = self
            .state
            .spawn_ball(kind, self.area, self.config.ball_speed);
        self.events.push(GameEvent::BallSpawned {
            id: ball.id,
            kind: ball.kind,
            pos: ball.pos,
        });
        ball
    }

    /// Goal reached: stop the drivers, persist unlocks/high scores/stats, and
    /// report the result.
    fn level_complete(&mut self) {
        self.state.drivers.disarm();
        self.state.phase = SessionPhase::Completed;

        let level = self.state.level;
        if self.progress.unlock_after(level) {
            self.progress.save_unlocked_levels(self.store.as_mut());
        }

        let level_time = self.config.time_limit_secs - self.state.time_left;
        if self
            .progress
            .high_scores
            .update(level, self.state.score, level_time)
        {
            self.progress.save_high_scores(self.store.as_mut());
        }

        self.progress.stats.total_score += u64::from(self.state.score);
        self.progress.stats.total_time_played_secs += u64::from(level_time);
        self.progress.save_stats(self.store.as_mut());

        self.events.push(GameEvent::LevelCompleted {
            score: self.state.score,
            goal_progress: self.state.goal_progress,
            goal: self.config.goal,
        });
        log::info!(
            "level {level} complete: score {} in {level_time}s",
            self.state.score
        );
    }

    /// Loss (time expired or hazard tapped): stop the drivers and persist
    /// stats. Computed identically for both causes.
    pub(crate) fn game_over(&mut self, cause: &str) {
        self.audio.play(SoundEffect::GameOver);
        self.state.drivers.disarm();
        self.state.phase = SessionPhase::Over;

        let elapsed = self.config.time_limit_secs - self.state.time_left;
        self.progress.stats.total_score += u64::from(self.state.score);
        self.progress.stats.total_time_played_secs += u64::from(elapsed);
        self.progress.save_stats(self.store.as_mut());

        self.events.push(GameEvent::LevelOver {
            score: self.state.score,
        });
        log::info!(
            "level {} over ({cause}): score {}",
            self.state.level,
            self.state.score
        );
    }
}
