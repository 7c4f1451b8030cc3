//! Headless autoplay demo
//!
//! Runs one level with a simple bot that taps a Normal ball a few times per
//! second, logging the event stream. Useful for eyeballing the state machine
//! without a frontend.

use tap_master::consts::FRAME_MS;
use tap_master::sim::tick;
use tap_master::{
    BallKind, GameEvent, MemoryStore, NullAudio, PlayArea, Session, SessionPhase,
};

/// Simulated time between bot taps
const TAP_EVERY_MS: f32 = 400.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("autoplay demo, seed {seed}");

    let mut session = Session::new(
        Box::new(MemoryStore::new()),
        Box::new(NullAudio),
        PlayArea::default(),
        seed,
    );
    session.start_game(1);

    let mut since_tap = 0.0f32;
    while session.state().is_playing() {
        tick(&mut session, FRAME_MS);
        since_tap += FRAME_MS;

        if since_tap >= TAP_EVERY_MS {
            since_tap = 0.0;
            let target = session
                .state()
                .balls
                .iter()
                .find(|b| b.kind == BallKind::Normal)
                .map(|b| b.id);
            if let Some(id) = target {
                session.tap(id);
            }
        }

        for event in session.drain_events() {
            match event {
                GameEvent::BallMoved { .. } => {}
                GameEvent::ScoreChanged {
                    score,
                    goal_progress,
                } => log::info!("score {score}, progress {goal_progress}"),
                GameEvent::TimeChanged { time_left } => log::debug!("{time_left}s left"),
                other => log::info!("{other:?}"),
            }
        }
    }

    match session.state().phase {
        SessionPhase::Completed => log::info!(
            "completed with score {}; unlocked {} levels",
            session.state().score,
            session.unlocked_levels()
        ),
        SessionPhase::Over => log::info!("game over with score {}", session.state().score),
        _ => {}
    }
    log::info!(
        "lifetime stats: {:?} ({})",
        session.progress().stats,
        session.progress().stats.play_time_display()
    );
}
