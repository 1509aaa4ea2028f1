//! Playback position tracking
//!
//! The output facility does not report positions, so the manager measures
//! wall-clock time spent playing.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub(crate) struct PositionClock {
    /// Position accumulated before the current run
    base: Duration,
    /// Start of the current run, if playing
    started: Option<Instant>,
}

impl PositionClock {
    /// Begin counting from the stored base
    pub(crate) fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop counting and fold the current run into the base
    pub(crate) fn pause(&mut self) -> Duration {
        if let Some(started) = self.started.take() {
            self.base += started.elapsed();
        }
        self.base
    }

    /// Forget everything and start over at `position`
    pub(crate) fn reset_to(&mut self, position: Duration) {
        self.base = position;
        self.started = None;
    }

    pub(crate) fn position(&self) -> Duration {
        self.base + self.started.map_or(Duration::ZERO, |s| s.elapsed())
    }
}
