//! Session state and entity types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Ball categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    /// Counts toward the level goal when tapped
    Normal,
    /// Adds seconds to the countdown when tapped
    TimeBonus,
    /// Removes seconds from the countdown when tapped
    TimePenalty,
    /// Ends the session when tapped; despawns on its own after a while
    Hazard,
}

/// One on-field target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    /// Top-left corner within the play area
    pub pos: Vec2,
    /// Units per 60 Hz frame
    pub vel: Vec2,
    /// Remaining lifetime; only hazards carry one
    pub lifetime_ms: Option<f32>,
}

/// Axis-aligned play-area rectangle; balls live in
/// `[0, width - BALL_SIZE] x [0, height - BALL_SIZE]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
        }
    }
}

impl PlayArea {
    /// Largest x a ball's top-left corner may take
    pub fn max_x(&self) -> f32 {
        self.width - BALL_SIZE
    }

    /// Largest y a ball's top-left corner may take
    pub fn max_y(&self) -> f32 {
        self.height - BALL_SIZE
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No level running; also the resting phase after a terminal transition
    Idle,
    /// A level is actively running
    Playing,
    /// Goal reached
    Completed,
    /// Time expired or a hazard was tapped
    Over,
}

/// Accumulators for the periodic drivers.
///
/// Countdown and hazard spawning run on fixed cadences independent of the
/// motion timestep; both accumulators are zeroed together when a terminal
/// transition cancels the drivers.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Drivers {
    /// Milliseconds accumulated toward the next one-second countdown firing
    pub countdown_ms: f32,
    /// Milliseconds accumulated toward the next hazard-spawner firing
    pub hazard_ms: f32,
    /// Hazard spawner only runs for levels past the first
    pub hazard_armed: bool,
}

impl Drivers {
    pub fn arm(&mut self, hazards: bool) {
        self.countdown_ms = 0.0;
        self.hazard_ms = 0.0;
        self.hazard_armed = hazards;
    }

    pub fn disarm(&mut self) {
        self.countdown_ms = 0.0;
        self.hazard_ms = 0.0;
        self.hazard_armed = false;
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Seed this session's RNG was created from
    pub seed: u64,
    pub level: u32,
    pub score: u32,
    pub goal_progress: u32,
    /// Whole seconds remaining on the countdown
    pub time_left: u32,
    pub phase: SessionPhase,
    /// Live balls, unique by id
    pub balls: Vec<Ball>,
    pub(crate) rng: Pcg32,
    pub(crate) drivers: Drivers,
    next_id: u32,
}

impl SessionState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            level: 1,
            score: 0,
            goal_progress: 0,
            time_left: 0,
            phase: SessionPhase::Idle,
            balls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            drivers: Drivers::default(),
            next_id: 1,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Allocate a new entity ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a ball at a random padded position with a random velocity whose
    /// components lie in `[-speed/2, speed/2)`. Hazards get a despawn timer.
    pub(crate) fn spawn_ball(&mut self, kind: BallKind, area: PlayArea, speed: f32) -> Ball {
        let id = self.next_entity_id();
        let pos = Vec2::new(
            self.rng.random_range(SPAWN_PADDING..area.max_x() - SPAWN_PADDING),
            self.rng.random_range(SPAWN_PADDING..area.max_y() - SPAWN_PADDING),
        );
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * speed,
            (self.rng.random::<f32>() - 0.5) * speed,
        );
        let ball = Ball {
            id,
            kind,
            pos,
            vel,
            lifetime_ms: (kind == BallKind::Hazard).then_some(HAZARD_LIFETIME_MS),
        };
        self.balls.push(ball);
        ball
    }

    /// Remove a ball by id; returns it if it was still present
    pub(crate) fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        let idx = self.balls.iter().position(|b| b.id == id)?;
        Some(self.balls.remove(idx))
    }

    pub fn has_normal_ball(&self) -> bool {
        self.balls.iter().any(|b| b.kind == BallKind::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_within_padded_area() {
        let mut state = SessionState::new(42);
        let area = PlayArea::default();
        for _ in 0..200 {
            let ball = state.spawn_ball(BallKind::Normal, area, 8.0);
            assert!(ball.pos.x >= SPAWN_PADDING && ball.pos.x <= area.max_x() - SPAWN_PADDING);
            assert!(ball.pos.y >= SPAWN_PADDING && ball.pos.y <= area.max_y() - SPAWN_PADDING);
            assert!(ball.vel.x.abs() <= 4.0 && ball.vel.y.abs() <= 4.0);
        }
    }

    #[test]
    fn test_only_hazards_get_a_lifetime() {
        let mut state = SessionState::new(7);
        let area = PlayArea::default();
        let normal = state.spawn_ball(BallKind::Normal, area, 4.0);
        let hazard = state.spawn_ball(BallKind::Hazard, area, 4.0);
        assert_eq!(normal.lifetime_ms, None);
        assert_eq!(hazard.lifetime_ms, Some(HAZARD_LIFETIME_MS));
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = SessionState::new(1);
        let area = PlayArea::default();
        for _ in 0..50 {
            state.spawn_ball(BallKind::Normal, area, 4.0);
        }
        let mut ids: Vec<u32> = state.balls.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_remove_ball_idempotent() {
        let mut state = SessionState::new(1);
        let area = PlayArea::default();
        let ball = state.spawn_ball(BallKind::Normal, area, 4.0);
        assert!(state.remove_ball(ball.id).is_some());
        assert!(state.remove_ball(ball.id).is_none());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let area = PlayArea::default();
        let mut a = SessionState::new(99);
        let mut b = SessionState::new(99);
        for _ in 0..20 {
            assert_eq!(
                a.spawn_ball(BallKind::Normal, area, 6.0),
                b.spawn_ball(BallKind::Normal, area, 6.0)
            );
        }
    }
}
