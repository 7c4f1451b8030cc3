//! State-change events for the presentation layer
//!
//! The session pushes these into an internal buffer as side effects happen;
//! the frontend drains the buffer once per frame and renders accordingly. No
//! return values flow back into the core.

use glam::Vec2;

use crate::sim::BallKind;

/// A discrete state change the presentation layer may want to show
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BallSpawned { id: u32, kind: BallKind, pos: Vec2 },
    BallMoved { id: u32, pos: Vec2 },
    BallRemoved { id: u32 },
    ScoreChanged { score: u32, goal_progress: u32 },
    TimeChanged { time_left: u32 },
    LevelCompleted { score: u32, goal_progress: u32, goal: u32 },
    LevelOver { score: u32 },
}
