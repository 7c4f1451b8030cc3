//! Deterministic session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, storage backend, or platform dependencies

pub mod motion;
pub mod session;
pub mod state;
pub mod tick;

pub use motion::step_ball;
pub use session::Session;
pub use state::{Ball, BallKind, PlayArea, SessionPhase, SessionState};
pub use tick::tick;
