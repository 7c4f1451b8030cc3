//! Fixed-timestep simulation clock
//!
//! One `tick` call advances three logically independent periodic drivers:
//!
//! - countdown: fires once per second, decrements the clock, ends the level
//!   at zero
//! - hazard spawner: fires every `hazard_interval_ms` for levels past the
//!   first; each firing spawns a hazard with probability
//!   `HAZARD_SPAWN_CHANCE` (independent Bernoulli per firing)
//! - motion: runs every call, moving live balls and expiring hazard lifetimes
//!
//! Driver order within a call is countdown, hazard, motion; each driver's own
//! firings are strictly ordered. Outside `Playing` the call is a no-op, so a
//! terminal transition that disarms the drivers also silences any tick that
//! arrives afterwards.

use rand::Rng;

use crate::consts::*;
use crate::events::GameEvent;
use crate::sim::motion::step_ball;
use crate::sim::session::Session;
use crate::sim::state::BallKind;

/// Advance the session by `dt_ms` of wall-clock time.
pub fn tick(session: &mut Session, dt_ms: f32) {
    if !session.state.is_playing() {
        return;
    }

    // Countdown driver
    session.state.drivers.countdown_ms += dt_ms;
    while session.state.drivers.countdown_ms >= COUNTDOWN_INTERVAL_MS {
        session.state.drivers.countdown_ms -= COUNTDOWN_INTERVAL_MS;
        session.state.time_left = session.state.time_left.saturating_sub(1);
        session.events.push(GameEvent::TimeChanged {
            time_left: session.state.time_left,
        });
        if session.state.time_left == 0 {
            session.game_over("time expired");
            return;
        }
    }

    // Hazard spawner, armed only for levels past the first
    if session.state.drivers.hazard_armed {
        let interval = session.config.hazard_interval_ms as f32;
        session.state.drivers.hazard_ms += dt_ms;
        while session.state.drivers.hazard_ms >= interval {
            session.state.drivers.hazard_ms -= interval;
            if session.state.rng.random_bool(HAZARD_SPAWN_CHANCE) {
                let hazard = session.spawn_and_emit(BallKind::Hazard);
                log::debug!("hazard {} spawned", hazard.id);
            }
        }
    }

    // Motion driver: cosmetic for outcomes, but hazards age out here
    let area = session.area;
    for ball in &mut session.state.balls {
        step_ball(ball, area, dt_ms);
        if let Some(lifetime) = &mut ball.lifetime_ms {
            *lifetime -= dt_ms;
        }
    }
    for ball in &session.state.balls {
        session.events.push(GameEvent::BallMoved {
            id: ball.id,
            pos: ball.pos,
        });
    }

    let expired: Vec<u32> = session
        .state
        .balls
        .iter()
        .filter(|b| matches!(b.lifetime_ms, Some(ms) if ms <= 0.0))
        .map(|b| b.id)
        .collect();
    for id in expired {
        session.state.remove_ball(id);
        session.events.push(GameEvent::BallRemoved { id });
    }
}
