//! Bounded bouncing motion
//!
//! Simple linear movement with axis-aligned reflection off the play-area
//! edges. Only velocity signs ever flip, so speed magnitude is preserved and
//! the motion bounces forever. This is not collision response between balls.

use crate::consts::FRAME_MS;
use crate::sim::state::{Ball, PlayArea};

/// Advance one ball by `dt_ms` of motion.
///
/// Velocities are in units per 60 Hz frame, so the step is scaled by
/// `dt_ms / FRAME_MS`. On boundary contact the outgoing velocity component is
/// sign-flipped and the position clamped back into
/// `[0, max_x] x [0, max_y]`.
pub fn step_ball(ball: &mut Ball, area: PlayArea, dt_ms: f32) {
    let frames = dt_ms / FRAME_MS;
    let mut x = ball.pos.x + ball.vel.x * frames;
    let mut y = ball.pos.y + ball.vel.y * frames;

    if (x <= 0.0 && ball.vel.x < 0.0) || (x >= area.max_x() && ball.vel.x > 0.0) {
        ball.vel.x = -ball.vel.x;
    }
    if (y <= 0.0 && ball.vel.y < 0.0) || (y >= area.max_y() && ball.vel.y > 0.0) {
        ball.vel.y = -ball.vel.y;
    }

    x = x.clamp(0.0, area.max_x());
    y = y.clamp(0.0, area.max_y());
    ball.pos.x = x;
    ball.pos.y = y;
}
