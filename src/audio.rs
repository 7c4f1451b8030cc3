//! Sound effect sink
//!
//! The core fires effects and never waits on the result; a playback failure
//! in the host is not its problem.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Normal ball tapped
    TapNormal,
    /// Time-bonus ball tapped
    TapBonus,
    /// Time-penalty ball tapped
    TapPenalty,
    /// Level ended in a loss
    GameOver,
}

/// Fire-and-forget audio playback seam
pub trait AudioSink {
    fn play(&self, effect: SoundEffect);
}

/// Sink that plays nothing (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _effect: SoundEffect) {}
}
